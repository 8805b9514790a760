use thiserror::Error;

use super::types::{ProjectionInput, ValidatedInput};

pub const MIN_CURRENT_AGE: u32 = 16;
pub const MAX_RETIREMENT_AGE: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Retirement age must be greater than current age.")]
    RetirementNotAfterCurrent,

    #[error("Please enter realistic ages.")]
    UnrealisticAge,

    #[error("Rates cannot be negative.")]
    NegativeRate,

    #[error("Savings amounts cannot be negative.")]
    NegativeAmount,

    #[error("{field} must be a finite number.")]
    NonFinite { field: &'static str },
}

/// Checks run in a fixed order and the first failure is reported.
pub fn validate(input: &ProjectionInput) -> Result<(), ValidationError> {
    if input.retirement_age <= input.current_age {
        return Err(ValidationError::RetirementNotAfterCurrent);
    }

    if input.current_age < MIN_CURRENT_AGE || input.retirement_age > MAX_RETIREMENT_AGE {
        return Err(ValidationError::UnrealisticAge);
    }

    if input.annual_return < 0.0 || input.inflation_rate < 0.0 {
        return Err(ValidationError::NegativeRate);
    }

    if input.current_savings < 0.0 || input.monthly_savings < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }

    for (field, value) in [
        ("Current savings", input.current_savings),
        ("Monthly savings", input.monthly_savings),
        ("Annual return", input.annual_return),
        ("Inflation rate", input.inflation_rate),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
    }

    Ok(())
}

impl ProjectionInput {
    pub fn validated(self) -> Result<ValidatedInput, ValidationError> {
        validate(&self)?;
        Ok(ValidatedInput(self))
    }
}
