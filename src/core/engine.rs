use super::types::{ChartSeries, ProjectionInput, ProjectionResult, ValidatedInput, YearRecord};

pub const MONTHS_PER_YEAR: u32 = 12;

/// Monthly rate that compounds to the inflation-adjusted annual return over
/// twelve steps.
pub fn real_monthly_rate(annual_return: f64, inflation_rate: f64) -> f64 {
    ((1.0 + annual_return) / (1.0 + inflation_rate)).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0
}

pub fn project_validated(input: &ValidatedInput) -> ProjectionResult {
    project(input.get())
}

/// Runs the projection without checking preconditions. Callers are expected to
/// go through `validate` first; a retirement age at or below the current age
/// yields a single baseline year.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    let years_to_retirement = input.retirement_age.saturating_sub(input.current_age);
    let real_monthly = real_monthly_rate(input.annual_return, input.inflation_rate);
    let annual_contribution = input.monthly_savings * MONTHS_PER_YEAR as f64;

    let mut balance = input.current_savings;
    let mut yearly_breakdown = Vec::with_capacity(years_to_retirement as usize + 1);

    for year in 0..=years_to_retirement {
        let start_balance = balance;
        if year > 0 {
            balance = grow_one_year(balance, real_monthly, input.monthly_savings);
        }
        let contributions = if year == 0 { 0.0 } else { annual_contribution };

        yearly_breakdown.push(YearRecord {
            age: input.current_age + year,
            start_balance,
            contributions,
            returns: balance - start_balance - contributions,
            end_balance: balance,
        });
    }

    let projected_savings = balance.round();
    let total_contributions = annual_contribution * years_to_retirement as f64;
    // Derived from the rounded balance, so it can differ from the summed
    // yearly returns by the rounding residual.
    let total_returns = projected_savings - input.current_savings - total_contributions;
    let chart = chart_series(&yearly_breakdown);

    ProjectionResult {
        projected_savings,
        total_contributions,
        total_returns,
        yearly_breakdown,
        years_to_retirement,
        currency: input.currency.clone(),
        chart,
    }
}

// Growth lands before the month's contribution.
fn grow_one_year(mut balance: f64, real_monthly: f64, monthly_savings: f64) -> f64 {
    for _ in 0..MONTHS_PER_YEAR {
        balance = balance * (1.0 + real_monthly) + monthly_savings;
    }
    balance
}

fn chart_series(years: &[YearRecord]) -> ChartSeries {
    let labels = years.iter().map(|y| format!("Age {}", y.age)).collect();
    let points = years.iter().map(|y| y.end_balance.round()).collect();
    ChartSeries { labels, points }
}
