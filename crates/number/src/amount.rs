//! Arbitrary precision integer amounts carried as canonical decimal strings.

use {
    derive_more::{From, Into},
    num::{BigInt, Signed, Zero},
    serde::{
        Deserialize,
        Deserializer,
        Serialize,
        Serializer,
        de::{self, Visitor},
    },
    std::{
        fmt::{self, Display},
        ops::Deref,
        str::FromStr,
    },
};

/// A signed integer of unbounded width.
///
/// The only accepted textual form is an optional `-` followed by one or more
/// ASCII digits. Anything else (whitespace, `+`, `_`, hex, exponents) is a
/// parse failure and never silently becomes zero.
#[derive(Clone, Debug, Default, From, Into, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(BigInt);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAmountError {
    #[error("empty amount")]
    Empty,
    #[error("{0:?} is not a base-10 integer")]
    NotDecimal(String),
}

impl Amount {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn as_big_int(&self) -> &BigInt {
        &self.0
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseAmountError::Empty);
        }
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseAmountError::NotDecimal(s.to_string()));
        }
        // Only digits and an optional sign reach the parser, so it cannot
        // take any of its lenient paths.
        BigInt::from_str(s)
            .map(Self)
            .map_err(|_| ParseAmountError::NotDecimal(s.to_string()))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Deref for Amount {
    type Target = BigInt;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "an integer encoded as a decimal string")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Amount::from_str(s).map_err(|err| {
                    E::custom(format!("failed to decode {s:?} as decimal amount: {err}"))
                })
            }
        }

        deserializer.deserialize_str(AmountVisitor)
    }
}
