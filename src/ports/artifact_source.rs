//! Artifact source port: Trait for loading the manifest and model.
//!
//! Artifacts are read-only inputs produced by an external training process.

use std::path::PathBuf;

use crate::domain::{FeatureManifest, ManifestError};

use super::price_model::{ModelError, PriceModel};

/// Error type for artifact loading.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),

    #[error("Model expects {model} features but manifest has {manifest} columns")]
    WidthMismatch { model: usize, manifest: usize },

    #[error("Model feature names differ from manifest columns at index {index}: {model:?} != {manifest:?}")]
    ColumnMismatch {
        index: usize,
        model: String,
        manifest: String,
    },
}

/// SHA-256 digests of the artifact files, for identification in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFingerprint {
    pub columns_sha256: String,
    pub model_sha256: String,
}

impl std::fmt::Display for ArtifactFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form, like a git abbreviated hash.
        write!(
            f,
            "columns={} model={}",
            &self.columns_sha256[..self.columns_sha256.len().min(12)],
            &self.model_sha256[..self.model_sha256.len().min(12)]
        )
    }
}

/// A freshly loaded artifact set.
pub struct Artifacts {
    pub manifest: FeatureManifest,
    pub model: Box<dyn PriceModel>,
    pub fingerprint: Option<ArtifactFingerprint>,
}

impl std::fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifacts")
            .field("manifest", &self.manifest)
            .field("model_features", &self.model.n_features())
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// Trait for artifact loading backends.
pub trait ArtifactSource: Send + Sync {
    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;

    /// Read and parse the manifest and model.
    ///
    /// # Errors
    /// Returns error if either artifact is missing or malformed.
    fn load(&self) -> Result<Artifacts, ArtifactError>;
}
