//! Linear regression adapter: Implementation of PriceModel.
//!
//! The training pipeline exports the fitted regressor as JSON:
//!
//! ```json
//! {
//!   "feature_names": ["indira nagar", "total_sqft", "bath", "bhk"],
//!   "coefficients": [21.3, 0.08, 3.1, -1.2],
//!   "intercept": -14.7
//! }
//! ```
//!
//! `feature_names` is optional. When present it is checked against the
//! column manifest at load time.

use serde::{Deserialize, Serialize};

use crate::ports::{ModelError, PriceModel};

/// Ordinary least squares model: `price = coefficients · x + intercept`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Create a model from raw parameters.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` if the parameters fail sanity checks.
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        let model = Self {
            feature_names: None,
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse an exported model file.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or the parameters are invalid.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let n = self.coefficients.len();
        if n == 0 {
            return Err(ModelError::Invalid("model has no coefficients".into()));
        }
        if let Some(i) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(ModelError::Invalid(format!("coefficient {i} is not finite")));
        }
        if !self.intercept.is_finite() {
            return Err(ModelError::Invalid("intercept is not finite".into()));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != n {
                return Err(ModelError::Invalid(format!(
                    "feature_names has {} entries but there are {n} coefficients",
                    names.len()
                )));
            }
        }
        Ok(())
    }
}

impl PriceModel for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                got: features.len(),
                expected: self.coefficients.len(),
            });
        }

        let y = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum::<f64>()
            + self.intercept;

        if !y.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(y)
    }
}
