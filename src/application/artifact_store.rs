//! Artifact store: Load-once cache of the manifest and model.
//!
//! The store answers the two prediction queries. Loading happens at most
//! once per store; concurrent first callers serialize on the init mutex and
//! only the first one reads the artifacts. Readers never take that mutex, so
//! an in-flight load does not stall them.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::domain::{FeatureManifest, PriceEstimate};
use crate::ports::{ArtifactError, ArtifactFingerprint, ArtifactSource, Artifacts, PriceModel};
use crate::HomepriceError;

/// Validated manifest and model, shared read-only by all requests.
pub struct LoadedArtifacts {
    manifest: FeatureManifest,
    model: Box<dyn PriceModel>,
    fingerprint: Option<ArtifactFingerprint>,
}

impl LoadedArtifacts {
    /// Check that the model input layout matches the manifest.
    ///
    /// # Errors
    /// Returns `ArtifactError::WidthMismatch` or `ArtifactError::ColumnMismatch`.
    pub fn validate(artifacts: Artifacts) -> Result<Self, ArtifactError> {
        let Artifacts {
            manifest,
            model,
            fingerprint,
        } = artifacts;

        if model.n_features() != manifest.len() {
            return Err(ArtifactError::WidthMismatch {
                model: model.n_features(),
                manifest: manifest.len(),
            });
        }

        if let Some(names) = model.feature_names() {
            let mismatch = names
                .iter()
                .map(|n| n.trim())
                .zip(manifest.columns())
                .position(|(a, b)| a != b.as_str());
            if let Some(index) = mismatch {
                return Err(ArtifactError::ColumnMismatch {
                    index,
                    model: names[index].clone(),
                    manifest: manifest.columns()[index].clone(),
                });
            }
        }

        Ok(Self {
            manifest,
            model,
            fingerprint,
        })
    }

    #[must_use]
    pub fn manifest(&self) -> &FeatureManifest {
        &self.manifest
    }

    #[must_use]
    pub fn model(&self) -> &dyn PriceModel {
        self.model.as_ref()
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<&ArtifactFingerprint> {
        self.fingerprint.as_ref()
    }
}

/// Service owning the lazily loaded artifacts.
pub struct ArtifactStore {
    source: Box<dyn ArtifactSource>,
    loaded: OnceLock<Arc<LoadedArtifacts>>,
    init: Mutex<()>,
}

impl ArtifactStore {
    /// Create an unloaded store backed by `source`.
    pub fn new(source: impl ArtifactSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            loaded: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Load the artifacts if this has not happened yet.
    ///
    /// Later calls return the cached artifacts without touching the source.
    /// A failed load leaves the store unloaded, so the next call retries.
    ///
    /// # Errors
    /// Returns `HomepriceError::ArtifactLoad` if reading or validation fails.
    pub fn ensure_loaded(&self) -> Result<Arc<LoadedArtifacts>, HomepriceError> {
        if let Some(loaded) = self.loaded() {
            return Ok(loaded);
        }

        let _init = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(loaded) = self.loaded() {
            return Ok(loaded);
        }

        tracing::info!("Loading saved artifacts from {}...", self.source.describe());
        let loaded = match self.source.load().and_then(LoadedArtifacts::validate) {
            Ok(l) => Arc::new(l),
            Err(e) => {
                tracing::error!("Artifact load failed: {e}");
                return Err(e.into());
            }
        };

        match loaded.fingerprint() {
            Some(fp) => tracing::info!(
                "Artifacts loaded: {} locations, {} features ({fp})",
                loaded.manifest.locations().len(),
                loaded.manifest.len()
            ),
            None => tracing::info!(
                "Artifacts loaded: {} locations, {} features",
                loaded.manifest.locations().len(),
                loaded.manifest.len()
            ),
        }

        // Only the init lock holder sets the cell.
        Ok(Arc::clone(self.loaded.get_or_init(|| loaded)))
    }

    fn loaded(&self) -> Option<Arc<LoadedArtifacts>> {
        self.loaded.get().map(Arc::clone)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded().is_some()
    }

    /// The location vocabulary, or `None` before the first load.
    ///
    /// Does not trigger a load.
    #[must_use]
    pub fn location_names(&self) -> Option<Vec<String>> {
        self.loaded().map(|l| l.manifest.locations().to_vec())
    }

    /// Estimate a price for one property.
    ///
    /// Unknown locations yield `PriceEstimate::NotFound`. Numeric inputs are
    /// passed to the model unvalidated.
    ///
    /// # Errors
    /// Returns `HomepriceError::NotLoaded` before the first load, or
    /// `HomepriceError::Model` if the model rejects the feature row.
    pub fn estimated_price(
        &self,
        location: &str,
        sqft: f64,
        bath: i64,
        bhk: i64,
    ) -> Result<PriceEstimate, HomepriceError> {
        let loaded = self.loaded().ok_or(HomepriceError::NotLoaded)?;

        let Some(index) = loaded.manifest.location_index(location) else {
            return Ok(PriceEstimate::NotFound);
        };

        let x = loaded
            .manifest
            .feature_vector(index, sqft, bath as f64, bhk as f64);
        let raw = loaded.model.predict(&x)?;

        Ok(PriceEstimate::from_raw(raw))
    }
}
