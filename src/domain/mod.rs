//! Domain layer: Core prediction types and logic.
//!
//! Pure Rust types with no I/O. The manifest defines the model input
//! layout, queries are coerced request bodies, estimates are the tagged
//! prediction outcome.

mod estimate;
mod manifest;
mod query;

pub use estimate::{round_price, PriceEstimate, NO_DATA_MESSAGE};
pub use manifest::{FeatureManifest, ManifestError, NUMERIC_COLUMNS};
pub use query::{PriceQuery, QueryError};
