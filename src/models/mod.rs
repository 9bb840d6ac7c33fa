pub mod fund;
pub mod ledger_entry;

pub use fund::Fund;
pub use ledger_entry::LedgerEntry;

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FundKind
// ---------------------------------------------------------------------------

/// What a fund row tracks. Stored and sent over the wire with the
/// historical labels `FON` and `HİSSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FundKind {
    /// A mutual fund position.
    #[default]
    #[serde(rename = "FON")]
    Position,
    /// A listed share.
    #[serde(rename = "HİSSE", alias = "HISSE")]
    Share,
}

impl FundKind {
    pub const ALL: [FundKind; 2] = [FundKind::Position, FundKind::Share];

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "FON" => Some(FundKind::Position),
            "HİSSE" | "HISSE" => Some(FundKind::Share),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FundKind::Position => "FON",
            FundKind::Share => "HİSSE",
        }
    }
}

impl fmt::Display for FundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// OperationKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    Increase,
    Decrease,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Increase => "INCREASE",
            OperationKind::Decrease => "DECREASE",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
