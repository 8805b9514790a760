mod engine;
mod types;
mod validate;

pub use engine::{MONTHS_PER_YEAR, project, project_validated, real_monthly_rate};
pub use types::{ChartSeries, ProjectionInput, ProjectionResult, ValidatedInput, YearRecord};
pub use validate::{MAX_RETIREMENT_AGE, MIN_CURRENT_AGE, ValidationError, validate};
