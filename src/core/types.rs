use serde::Serialize;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_savings: f64,
    pub monthly_savings: f64,
    pub annual_return: f64,
    pub inflation_rate: f64,
    pub currency: String,
}

/// A `ProjectionInput` that has passed `validate`. Only obtainable through
/// `ProjectionInput::validated`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput(pub(super) ProjectionInput);

impl ValidatedInput {
    pub fn get(&self) -> &ProjectionInput {
        &self.0
    }

    pub fn into_inner(self) -> ProjectionInput {
        self.0
    }
}

impl Deref for ValidatedInput {
    type Target = ProjectionInput;

    fn deref(&self) -> &ProjectionInput {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub age: u32,
    pub start_balance: f64,
    pub contributions: f64,
    pub returns: f64,
    pub end_balance: f64,
}

/// Line-chart series, one entry per `YearRecord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub projected_savings: f64,
    pub total_contributions: f64,
    pub total_returns: f64,
    pub yearly_breakdown: Vec<YearRecord>,
    pub years_to_retirement: u32,
    pub currency: String,
    pub chart: ChartSeries,
}
