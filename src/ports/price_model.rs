//! Price model port: Trait for regression model backends.
//!
//! This trait abstracts the model format from the application logic, so a
//! different exported backend can be plugged in without touching the HTTP
//! layer.

/// Error type for model operations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Malformed model file: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Feature count mismatch: got {got}, expected {expected}")]
    FeatureCount { got: usize, expected: usize },

    #[error("Model produced a non-finite estimate")]
    NonFinite,
}

/// Trait for regression models producing a scalar price.
pub trait PriceModel: Send + Sync {
    /// Number of input features the model expects.
    fn n_features(&self) -> usize;

    /// Column names the model was trained on, if the export carries them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Predict a price for one feature row.
    ///
    /// # Errors
    /// Returns `ModelError::FeatureCount` if `features` has the wrong width,
    /// or `ModelError::NonFinite` if the result is not a finite number.
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;
}
