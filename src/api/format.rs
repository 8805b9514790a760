use crate::core::ProjectionResult;

fn currency_prefix(currency: &str) -> String {
    match currency {
        "USD" => "$".to_string(),
        "CAD" => "CA$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{other} "),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-unit currency string, e.g. `$12,345` or `AED 1,000`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    if !amount.is_finite() {
        return format!("{}{amount}", currency_prefix(currency));
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!(
        "{sign}{}{}",
        currency_prefix(currency),
        group_thousands(&digits)
    )
}

pub fn share_text(result: &ProjectionResult, retirement_age: u32) -> String {
    format!(
        "I'm projected to have {} at age {retirement_age}.",
        format_currency(result.projected_savings, &result.currency)
    )
}

pub fn render_table(result: &ProjectionResult) -> String {
    let cur = result.currency.as_str();
    let mut out = format!(
        "{:>5} {:>16} {:>16} {:>16} {:>16}\n{}\n",
        "Age",
        "Start Balance",
        "Contributions",
        "Returns",
        "End Balance",
        "-".repeat(73)
    );
    for year in &result.yearly_breakdown {
        out.push_str(&format!(
            "{:>5} {:>16} {:>16} {:>16} {:>16}\n",
            year.age,
            format_currency(year.start_balance, cur),
            format_currency(year.contributions, cur),
            format_currency(year.returns, cur),
            format_currency(year.end_balance, cur),
        ));
    }
    out.push_str(&format!(
        "\nProjected savings:   {}\nTotal contributions: {} over {} years\nInvestment returns:  {}\n",
        format_currency(result.projected_savings, cur),
        format_currency(result.total_contributions, cur),
        result.years_to_retirement,
        format_currency(result.total_returns, cur)
    ));
    out
}
