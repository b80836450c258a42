use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Requested bar granularity token.
///
/// The token set is closed; dispatch over it goes through an explicit
/// mapping table rather than dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Minute1,
    Minute5,
    Minute15,
    Minute30,
    Hour,
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Self; 8] = [
        Self::Minute1,
        Self::Minute5,
        Self::Minute15,
        Self::Minute30,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute1 => "minute1",
            Self::Minute5 => "minute5",
            Self::Minute15 => "minute15",
            Self::Minute30 => "minute30",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Lenient token parse; empty or unrecognized tokens default to `Day`.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "minute1" => Self::Minute1,
            "minute5" => Self::Minute5,
            "minute15" => Self::Minute15,
            "minute30" => Self::Minute30,
            "hour" => Self::Hour,
            "week" => Self::Week,
            "month" => Self::Month,
            _ => Self::Day,
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instrument class a history request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Stock,
    Index,
}
