use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::{AdjustmentError, Operation};
use crate::models::OperationKind;

/// What to do when an operation would take the payable amount below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativePayablePolicy {
    /// Refuse the operation; nothing is written.
    #[default]
    Reject,
    /// Settle at zero and record only the part of the delta actually applied.
    Clamp,
}

#[derive(Debug, Error)]
#[error("unknown negative payable policy '{0}' (expected 'reject' or 'clamp')")]
pub struct ParsePolicyError(String);

impl FromStr for NegativePayablePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(NegativePayablePolicy::Reject),
            "clamp" | "clamp_to_zero" => Ok(NegativePayablePolicy::Clamp),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Outcome of applying an operation to a payable amount, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub previous_amount: Decimal,
    pub new_amount: Decimal,
    /// `|new_amount - previous_amount|`
    pub amount: Decimal,
    pub kind: OperationKind,
    /// The operation as actually applied (differs from the request only when clamped).
    pub applied: Operation,
}

impl Adjustment {
    pub fn operation_text(&self) -> String {
        self.applied.to_string()
    }
}

/// Compute the new payable amount for `operation` on top of `previous`.
pub fn plan_adjustment(
    previous: Decimal,
    operation: &Operation,
    policy: NegativePayablePolicy,
) -> Result<Adjustment, AdjustmentError> {
    let requested = previous
        .checked_add(operation.signed_delta())
        .ok_or_else(|| AdjustmentError::InvalidFormat(operation.to_string()))?;

    let (new_amount, applied) = if requested < Decimal::ZERO {
        match policy {
            NegativePayablePolicy::Reject => {
                return Err(AdjustmentError::NegativeResult {
                    previous,
                    operation: operation.to_string(),
                    result: requested,
                });
            }
            NegativePayablePolicy::Clamp => (Decimal::ZERO, Operation::subtract(previous)),
        }
    } else {
        (requested, *operation)
    };

    let delta = new_amount - previous;
    let kind = if delta < Decimal::ZERO {
        OperationKind::Decrease
    } else {
        OperationKind::Increase
    };

    Ok(Adjustment {
        previous_amount: previous,
        new_amount: new_amount.normalize(),
        amount: delta.abs().normalize(),
        kind,
        applied,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn op(s: &str) -> Operation {
        Operation::parse(s).unwrap()
    }

    #[test]
    fn test_increase() {
        let adj = plan_adjustment(Decimal::from(2), &op("+3"), NegativePayablePolicy::Reject).unwrap();
        assert_eq!(adj.new_amount, Decimal::from(5));
        assert_eq!(adj.amount, Decimal::from(3));
        assert_eq!(adj.kind, OperationKind::Increase);
        assert_eq!(adj.operation_text(), "+3");
    }

    #[test]
    fn test_decrease() {
        let adj = plan_adjustment(Decimal::from(10), &op("-2.5"), NegativePayablePolicy::Reject).unwrap();
        assert_eq!(adj.new_amount, Decimal::new(75, 1));
        assert_eq!(adj.amount, Decimal::new(25, 1));
        assert_eq!(adj.kind, OperationKind::Decrease);
        assert_eq!(adj.operation_text(), "-2.5");
    }

    #[test]
    fn test_decrease_to_exactly_zero_succeeds() {
        for policy in [NegativePayablePolicy::Reject, NegativePayablePolicy::Clamp] {
            let adj = plan_adjustment(Decimal::from(4), &op("-4"), policy).unwrap();
            assert_eq!(adj.new_amount, Decimal::ZERO);
            assert_eq!(adj.amount, Decimal::from(4));
            assert_eq!(adj.operation_text(), "-4");
        }
    }

    #[test]
    fn test_below_zero_rejected() {
        let err = plan_adjustment(Decimal::from(4), &op("-4.0001"), NegativePayablePolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, AdjustmentError::NegativeResult { .. }));
    }

    #[test]
    fn test_below_zero_clamped() {
        let adj = plan_adjustment(Decimal::from(4), &op("-10"), NegativePayablePolicy::Clamp).unwrap();
        assert_eq!(adj.new_amount, Decimal::ZERO);
        assert_eq!(adj.amount, Decimal::from(4));
        assert_eq!(adj.kind, OperationKind::Decrease);
        assert_eq!(adj.operation_text(), "-4");
    }

    #[test]
    fn test_zero_delta_counts_as_increase() {
        let adj = plan_adjustment(Decimal::from(1), &op("0"), NegativePayablePolicy::Reject).unwrap();
        assert_eq!(adj.new_amount, Decimal::from(1));
        assert_eq!(adj.amount, Decimal::ZERO);
        assert_eq!(adj.kind, OperationKind::Increase);
    }

    #[test]
    fn test_minus_zero_is_recorded_as_plus_zero() {
        let adj = plan_adjustment(Decimal::from(3), &op("-0"), NegativePayablePolicy::Reject).unwrap();
        assert_eq!(adj.new_amount, Decimal::from(3));
        assert_eq!(adj.kind, OperationKind::Increase);
        assert_eq!(adj.operation_text(), "+0");

        let adj = plan_adjustment(Decimal::ZERO, &op("-1"), NegativePayablePolicy::Clamp).unwrap();
        assert_eq!(adj.kind, OperationKind::Increase);
        assert_eq!(adj.operation_text(), "+0");
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("reject".parse::<NegativePayablePolicy>().unwrap(), NegativePayablePolicy::Reject);
        assert_eq!("CLAMP".parse::<NegativePayablePolicy>().unwrap(), NegativePayablePolicy::Clamp);
        assert!("ignore".parse::<NegativePayablePolicy>().is_err());
    }
}
