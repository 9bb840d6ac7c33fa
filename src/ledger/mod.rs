//! Payable-amount bookkeeping: operation parsing, adjustment planning and
//! the derived debt statistics. Everything here is pure; persistence lives
//! in `services::payable`.

pub mod adjustment;
pub mod numbers;
pub mod operation;
pub mod stats;

pub use adjustment::{plan_adjustment, Adjustment, NegativePayablePolicy};
pub use operation::{Direction, Operation};
pub use stats::{compute_debt_statistics, DebtStatistics};

use rust_decimal::Decimal;
use thiserror::Error;

/// Why an adjustment was refused before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustmentError {
    #[error("operation is required")]
    EmptyOperation,

    #[error("invalid operation format: '{0}' (use +5, -3 or 5)")]
    InvalidFormat(String),

    #[error("payable amount cannot go negative ({previous} {operation} = {result})")]
    NegativeResult {
        previous: Decimal,
        operation: String,
        result: Decimal,
    },
}
