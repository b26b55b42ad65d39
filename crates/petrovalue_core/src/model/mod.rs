mod records;
mod results;

pub use records::{RECONCILIATION_TOLERANCE, YearlyRecord};
pub use results::{Breakeven, Evaluation, Metrics, NpvPoint, Payback, Results, Warning};
