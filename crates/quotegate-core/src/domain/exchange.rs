use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One of the three disjoint listing partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    #[serde(rename = "sh")]
    Shanghai,
    #[serde(rename = "sz")]
    Shenzhen,
    #[serde(rename = "bj")]
    Beijing,
}

impl Exchange {
    /// Fixed scan order for cross-market queries.
    pub const ALL: [Self; 3] = [Self::Shanghai, Self::Shenzhen, Self::Beijing];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shanghai => "sh",
            Self::Shenzhen => "sz",
            Self::Beijing => "bj",
        }
    }

    /// Lenient filter token parse; anything unrecognized means "all markets".
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "sh" => Some(Self::Shanghai),
            "sz" => Some(Self::Shenzhen),
            "bj" => Some(Self::Beijing),
            _ => None,
        }
    }
}

impl Display for Exchange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Security classification derived from the code prefix of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityClass {
    Stock,
    Index,
    Fund,
    Other,
}

impl SecurityClass {
    /// Classify a listing code within its partition's namespace.
    pub fn classify(exchange: Exchange, code: &str) -> Self {
        match exchange {
            Exchange::Shanghai => {
                if code.starts_with("60") || code.starts_with("68") {
                    Self::Stock
                } else if code.starts_with("000") || code.starts_with("88") {
                    Self::Index
                } else if code.starts_with('5') {
                    Self::Fund
                } else {
                    Self::Other
                }
            }
            Exchange::Shenzhen => {
                if code.starts_with("00") || code.starts_with("30") {
                    Self::Stock
                } else if code.starts_with("39") {
                    Self::Index
                } else if code.starts_with("15") || code.starts_with("16") {
                    Self::Fund
                } else {
                    Self::Other
                }
            }
            Exchange::Beijing => {
                if code.starts_with('8') || code.starts_with("43") || code.starts_with("92") {
                    Self::Stock
                } else {
                    Self::Other
                }
            }
        }
    }
}

/// One entry of a partition's instrument listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentListing {
    pub code: String,
    pub name: String,
    /// Signed price change carried by the upstream listing; its sign is the
    /// directional signal used by market statistics.
    pub last_price: f64,
    pub class: SecurityClass,
}

impl InstrumentListing {
    pub fn new(
        exchange: Exchange,
        code: impl Into<String>,
        name: impl Into<String>,
        last_price: f64,
    ) -> Self {
        let code = code.into();
        let class = SecurityClass::classify(exchange, &code);
        Self {
            code,
            name: name.into(),
            last_price,
            class,
        }
    }

    /// Only tradable equities pass search and statistics filters.
    pub fn is_stock(&self) -> bool {
        self.class == SecurityClass::Stock
    }
}
