use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use super::AdjustmentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Add,
    Subtract,
}

/// A parsed signed-delta instruction such as `+5`, `-3.5` or `5`.
///
/// `magnitude` is always non-negative; the sign lives in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub direction: Direction,
    pub magnitude: Decimal,
}

impl Operation {
    pub fn add(magnitude: Decimal) -> Self {
        Self {
            direction: Direction::Add,
            magnitude: magnitude.normalize(),
        }
    }

    /// Subtracting zero is recorded as `+0`.
    pub fn subtract(magnitude: Decimal) -> Self {
        if magnitude.is_zero() {
            return Self::add(magnitude);
        }

        Self {
            direction: Direction::Subtract,
            magnitude: magnitude.normalize(),
        }
    }

    /// Parse user input. A leading `+` adds, a leading `-` subtracts, and a
    /// bare number adds. The part after the sign must be a plain
    /// non-negative decimal.
    pub fn parse(text: &str) -> Result<Self, AdjustmentError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AdjustmentError::EmptyOperation);
        }

        let (direction, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
            (Direction::Add, rest)
        } else if let Some(rest) = trimmed.strip_prefix('-') {
            (Direction::Subtract, rest)
        } else {
            (Direction::Add, trimmed)
        };

        let rest = rest.trim();
        let well_formed = !rest.is_empty()
            && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
            && rest.chars().any(|c| c.is_ascii_digit())
            && rest.matches('.').count() <= 1;
        if !well_formed {
            return Err(AdjustmentError::InvalidFormat(trimmed.to_string()));
        }

        let magnitude = Decimal::from_str(rest)
            .map_err(|_| AdjustmentError::InvalidFormat(trimmed.to_string()))?;

        Ok(match direction {
            Direction::Add => Self::add(magnitude),
            Direction::Subtract => Self::subtract(magnitude),
        })
    }

    /// The delta with its sign applied.
    pub fn signed_delta(&self) -> Decimal {
        match self.direction {
            Direction::Add => self.magnitude,
            Direction::Subtract => -self.magnitude,
        }
    }
}

/// Normalized form recorded in the ledger: always signed, no trailing zeros.
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.direction {
            Direction::Add => '+',
            Direction::Subtract => '-',
        };
        write!(f, "{}{}", sign, self.magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_explicit_signs() {
        let op = Operation::parse("+5").unwrap();
        assert_eq!(op.direction, Direction::Add);
        assert_eq!(op.magnitude, Decimal::from(5));

        let op = Operation::parse("-3.5").unwrap();
        assert_eq!(op.direction, Direction::Subtract);
        assert_eq!(op.magnitude, Decimal::new(35, 1));
        assert_eq!(op.signed_delta(), Decimal::new(-35, 1));
    }

    #[test]
    fn test_bare_number_is_increase() {
        assert_eq!(Operation::parse("5").unwrap(), Operation::parse("+5").unwrap());
        assert_eq!(Operation::parse("5").unwrap().to_string(), "+5");
    }

    #[test]
    fn test_bare_negative_is_decrease() {
        let op = Operation::parse("  -5 ").unwrap();
        assert_eq!(op, Operation::subtract(Decimal::from(5)));
        assert_eq!(op.to_string(), "-5");
    }

    #[test]
    fn test_normalized_display() {
        assert_eq!(Operation::parse("+05.50").unwrap().to_string(), "+5.5");
        assert_eq!(Operation::parse("+ 2").unwrap().to_string(), "+2");
        assert_eq!(Operation::parse("-0.0").unwrap().to_string(), "+0");
        assert_eq!(Operation::parse("-0").unwrap().direction, Direction::Add);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(Operation::parse(""), Err(AdjustmentError::EmptyOperation));
        assert_eq!(Operation::parse("   "), Err(AdjustmentError::EmptyOperation));
        for bad in ["abc", "+", "-", "--5", "+-5", "5abc", "1.2.3", "1e3", "NaN"] {
            assert!(
                matches!(Operation::parse(bad), Err(AdjustmentError::InvalidFormat(_))),
                "expected InvalidFormat for {bad:?}"
            );
        }
    }
}
