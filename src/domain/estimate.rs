//! Price estimate result.

use serde::{Serialize, Serializer};

/// Message returned in place of a price for unknown locations.
pub const NO_DATA_MESSAGE: &str = "No data available for this location";

/// Outcome of a price prediction.
///
/// An unknown location is a normal outcome, not an error. On the wire both
/// variants collapse into the single `estimated_price` field: a number when
/// found, the fixed message string otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceEstimate {
    /// Location resolved; price rounded to two decimals
    Found { price: f64 },
    /// Location not in the vocabulary
    NotFound,
}

impl PriceEstimate {
    /// Build a found estimate from a raw model output.
    #[must_use]
    pub fn from_raw(raw: f64) -> Self {
        Self::Found {
            price: round_price(raw),
        }
    }

    #[must_use]
    pub fn found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    #[must_use]
    pub fn price(&self) -> Option<f64> {
        match self {
            Self::Found { price } => Some(*price),
            Self::NotFound => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Found { .. } => None,
            Self::NotFound => Some(NO_DATA_MESSAGE),
        }
    }
}

impl std::fmt::Display for PriceEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found { price } => write!(f, "{price:.2}"),
            Self::NotFound => f.write_str(NO_DATA_MESSAGE),
        }
    }
}

impl Serialize for PriceEstimate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found { price } => serializer.serialize_f64(*price),
            Self::NotFound => serializer.serialize_str(NO_DATA_MESSAGE),
        }
    }
}

/// Round to two decimal places. Exact halves go to the even neighbour.
#[must_use]
pub fn round_price(raw: f64) -> f64 {
    (raw * 100.0).round_ties_even() / 100.0
}
