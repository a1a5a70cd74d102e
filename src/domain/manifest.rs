//! Feature column manifest.
//!
//! The manifest is the ordered list of model input columns exported by the
//! training pipeline: one-hot location columns first, then exactly three
//! numeric columns in the fixed order square footage, bathrooms, bedrooms.

use serde::Deserialize;

/// Number of trailing numeric columns (sqft, bath, bhk).
pub const NUMERIC_COLUMNS: usize = 3;

/// Error type for manifest parsing.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Malformed manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest needs at least {NUMERIC_COLUMNS} columns, got {0}")]
    TooFewColumns(usize),
}

/// On-disk layout of `columns.json`.
#[derive(Debug, Deserialize)]
struct ColumnsFile {
    data_columns: Vec<String>,
}

/// Ordered feature columns defining the model input layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureManifest {
    columns: Vec<String>,
    /// Lower-cased location columns, parallel to `locations()`.
    lookup: Vec<String>,
}

impl FeatureManifest {
    /// Build a manifest from column names. Each name is trimmed.
    ///
    /// # Errors
    /// Returns `ManifestError::TooFewColumns` if fewer than three columns are given.
    pub fn new<I, S>(columns: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .collect();

        if columns.len() < NUMERIC_COLUMNS {
            return Err(ManifestError::TooFewColumns(columns.len()));
        }

        let lookup = columns[..columns.len() - NUMERIC_COLUMNS]
            .iter()
            .map(|c| c.to_lowercase())
            .collect();

        Ok(Self { columns, lookup })
    }

    /// Parse the `{"data_columns": [...]}` manifest file.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or has too few columns.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ManifestError> {
        let file: ColumnsFile = serde_json::from_slice(bytes)?;
        Self::new(file.data_columns)
    }

    /// All columns, in manifest order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Width of the feature vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// False for any manifest built through `new`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The location vocabulary: every column but the trailing numeric ones.
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.columns[..self.columns.len() - NUMERIC_COLUMNS]
    }

    /// Resolve a free-text location to its column index.
    ///
    /// The input is trimmed and lower-cased. Only location columns are
    /// searched, and the first match wins.
    #[must_use]
    pub fn location_index(&self, location: &str) -> Option<usize> {
        let wanted = location.trim().to_lowercase();
        self.lookup.iter().position(|c| *c == wanted)
    }

    /// Build the model input row for a resolved location.
    ///
    /// Layout: one-hot at `location_index`, then `[len-3] = sqft`,
    /// `[len-2] = bath`, `[len-1] = bhk`; every other slot is zero.
    #[must_use]
    pub fn feature_vector(&self, location_index: usize, sqft: f64, bath: f64, bhk: f64) -> Vec<f64> {
        let n = self.columns.len();
        let mut x = vec![0.0; n];
        x[n - 3] = sqft;
        x[n - 2] = bath;
        x[n - 1] = bhk;
        if location_index < n - NUMERIC_COLUMNS {
            x[location_index] = 1.0;
        }
        x
    }
}
