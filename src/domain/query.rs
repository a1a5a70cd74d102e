//! Price query parsing.
//!
//! Request bodies come from browser forms, so numeric fields may arrive as
//! JSON numbers or as numeric strings. Floats given for integer fields are
//! truncated toward zero and integer strings are parsed. Anything else is
//! rejected.

use serde_json::{Map, Value};

/// Error type for request coercion.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Malformed request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing field: {0}")]
    Missing(&'static str),

    #[error("Field {field} is not {expected}: {value}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// A prediction request after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuery {
    /// Free-text location, normalized later during lookup
    pub location: String,
    /// Total square footage
    pub sqft: f64,
    /// Bathroom count
    pub bath: i64,
    /// Bedroom count (BHK)
    pub bhk: i64,
}

impl PriceQuery {
    /// Parse a raw request body.
    ///
    /// # Errors
    /// Returns error if the body is not a JSON object or a field is missing
    /// or cannot be coerced.
    pub fn from_json(body: &[u8]) -> Result<Self, QueryError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(&value)
    }

    /// Coerce an already-parsed JSON value.
    ///
    /// # Errors
    /// See [`PriceQuery::from_json`].
    pub fn from_value(value: &Value) -> Result<Self, QueryError> {
        let obj = value.as_object().ok_or(QueryError::NotAnObject)?;

        let sqft = coerce_float(field(obj, "sqft")?, "sqft")?;
        let location = match field(obj, "location")? {
            Value::String(s) => s.clone(),
            other => {
                return Err(QueryError::Invalid {
                    field: "location",
                    expected: "a string",
                    value: other.to_string(),
                })
            }
        };
        let bhk = coerce_int(field(obj, "bedrooms")?, "bedrooms")?;
        let bath = coerce_int(field(obj, "bathrooms")?, "bathrooms")?;

        Ok(Self {
            location,
            sqft,
            bath,
            bhk,
        })
    }
}

fn field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, QueryError> {
    match obj.get(name) {
        None | Some(Value::Null) => Err(QueryError::Missing(name)),
        Some(v) => Ok(v),
    }
}

fn invalid(field: &'static str, expected: &'static str, value: &Value) -> QueryError {
    QueryError::Invalid {
        field,
        expected,
        value: value.to_string(),
    }
}

fn coerce_float(value: &Value, name: &'static str) -> Result<f64, QueryError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(name, "a number", value)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(name, "a number", value)),
        _ => Err(invalid(name, "a number", value)),
    }
}

fn coerce_int(value: &Value, name: &'static str) -> Result<i64, QueryError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // `as` saturates out-of-range floats.
            match n.as_f64() {
                Some(f) if f.is_finite() => Ok(f.trunc() as i64),
                _ => Err(invalid(name, "an integer", value)),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(name, "an integer", value)),
        _ => Err(invalid(name, "an integer", value)),
    }
}
