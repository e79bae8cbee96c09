//! Market snapshots as supplied by the market state provider.

use {
    crate::error::OrderError,
    number::Amount,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// A `BASE/QUOTE` pair name such as `ETH/USDT`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Ticker {
    pub base: String,
    pub quote: String,
}

impl FromStr for Ticker {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || OrderError::BadField(format!("ticker {s:?} must be in format AAA/BBB"));
        if s.is_empty() {
            return Err(OrderError::BadField("no ticker specified".to_string()));
        }
        let (base, quote) = s.split_once('/').ok_or_else(bad)?;
        if quote.contains('/') || base.trim().is_empty() || quote.trim().is_empty() {
            return Err(bad());
        }
        Ok(Self {
            base: base.to_string(),
            quote: quote.to_string(),
        })
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Read-only view of a derivative market at the time an order is validated.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivativeMarket {
    pub ticker: String,
    /// Permyriad, e.g. 1000 for 10%.
    pub initial_margin_ratio: Amount,
    pub index_price: Amount,
}

impl DerivativeMarket {
    pub fn ticker(&self) -> Result<Ticker, OrderError> {
        self.ticker.parse()
    }
}
