use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::numbers::{parse_price, parse_quantity};
use crate::models::Fund;

/// Monetary view of all funds: what is owed in total, what has been paid,
/// and what remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtStatistics {
    pub total: Decimal,
    pub paid: Decimal,
    pub remaining: Decimal,
    pub percent_complete: i64,
}

/// Aggregate price × quantity over a fund snapshot.
///
/// Funds whose price is the `-` placeholder (or otherwise unreadable)
/// contribute zero.
pub fn compute_debt_statistics(funds: &[Fund]) -> DebtStatistics {
    let mut total = Decimal::ZERO;
    let mut paid = Decimal::ZERO;

    for fund in funds {
        let price = parse_price(&fund.price);
        let total_qty = parse_quantity(&fund.total_amount);
        let payable_qty = parse_quantity(&fund.payable_amount);

        total = total.saturating_add(price.saturating_mul(total_qty));
        paid = paid.saturating_add(price.saturating_mul(payable_qty));
    }

    let remaining = total.saturating_sub(paid);

    DebtStatistics {
        total: total.normalize(),
        paid: paid.normalize(),
        remaining: remaining.normalize(),
        percent_complete: percent_complete(total, paid),
    }
}

fn percent_complete(total: Decimal, paid: Decimal) -> i64 {
    if total <= Decimal::ZERO {
        return 0;
    }

    paid.checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_i64())
        .unwrap_or(0)
}
