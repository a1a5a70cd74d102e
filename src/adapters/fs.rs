//! Filesystem adapter: Implementation of ArtifactSource.
//!
//! Reads the column manifest and the exported linear model from two file
//! paths and fingerprints both with SHA-256.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::adapters::linear::LinearModel;
use crate::domain::FeatureManifest;
use crate::ports::{ArtifactError, ArtifactFingerprint, ArtifactSource, Artifacts};

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

pub const COLUMNS_FILE_NAME: &str = "columns.json";
pub const MODEL_FILE_NAME: &str = "house_prices_prediction.json";

/// Lowercase hex SHA-256 of a byte slice.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn read(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Artifact pair stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsArtifacts {
    columns_path: PathBuf,
    model_path: PathBuf,
}

impl FsArtifacts {
    #[must_use]
    pub fn new(columns_path: impl Into<PathBuf>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            columns_path: columns_path.into(),
            model_path: model_path.into(),
        }
    }

    /// Both files inside one directory, with the default file names.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(COLUMNS_FILE_NAME), dir.join(MODEL_FILE_NAME))
    }

    #[must_use]
    pub fn columns_path(&self) -> &Path {
        &self.columns_path
    }

    #[must_use]
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Default for FsArtifacts {
    fn default() -> Self {
        Self::in_dir(Path::new(DEFAULT_ARTIFACT_DIR))
    }
}

impl ArtifactSource for FsArtifacts {
    fn describe(&self) -> String {
        format!(
            "{} + {}",
            self.columns_path.display(),
            self.model_path.display()
        )
    }

    fn load(&self) -> Result<Artifacts, ArtifactError> {
        let columns_bytes = read(&self.columns_path)?;
        let manifest = FeatureManifest::from_json(&columns_bytes)?;
        tracing::info!(
            "Loaded {} columns ({} locations) from {:?}",
            manifest.len(),
            manifest.locations().len(),
            self.columns_path
        );

        let model_bytes = read(&self.model_path)?;
        let model = LinearModel::from_json(&model_bytes)?;
        tracing::info!(
            "Loaded linear model from {:?} (n_features={})",
            self.model_path,
            model.coefficients.len()
        );

        Ok(Artifacts {
            manifest,
            model: Box::new(model),
            fingerprint: Some(ArtifactFingerprint {
                columns_sha256: sha256_hex(&columns_bytes),
                model_sha256: sha256_hex(&model_bytes),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_artifacts(dir: &Path) {
        std::fs::write(
            dir.join("columns.json"),
            r#"{"data_columns": ["indira nagar", "total_sqft", "bath", "bhk"]}"#,
        )
        .expect("write columns");
        std::fs::write(
            dir.join("house_prices_prediction.json"),
            r#"{"coefficients": [10.0, 0.1, 1.0, 1.0], "intercept": 5.0}"#,
        )
        .expect("write model");
    }

    #[test]
    fn test_load_from_dir() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());

        let artifacts = FsArtifacts::in_dir(temp.path()).load().expect("load");
        assert_eq!(artifacts.manifest.locations(), ["indira nagar"]);
        assert_eq!(artifacts.model.n_features(), 4);

        let fp = artifacts.fingerprint.expect("fingerprint");
        assert_eq!(fp.columns_sha256.len(), 64);
        let columns = std::fs::read(temp.path().join("columns.json")).expect("read");
        assert_eq!(fp.columns_sha256, sha256_hex(&columns));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let temp = tempdir().expect("tempdir");
        let err = FsArtifacts::in_dir(temp.path()).load().expect_err("must fail");
        assert!(matches!(err, ArtifactError::Read { .. }));
        assert!(err.to_string().contains("columns.json"));
    }

    #[test]
    fn test_malformed_model_file() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path());
        std::fs::write(temp.path().join("house_prices_prediction.json"), "{").expect("write");

        let err = FsArtifacts::in_dir(temp.path()).load().expect_err("must fail");
        assert!(matches!(err, ArtifactError::Model(_)));
    }

    #[test]
    fn test_bundled_artifacts_are_consistent() {
        use crate::application::LoadedArtifacts;
        use crate::domain::PriceEstimate;

        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_ARTIFACT_DIR);
        let artifacts = FsArtifacts::in_dir(&dir).load().expect("load bundled artifacts");
        let loaded = LoadedArtifacts::validate(artifacts).expect("model matches manifest");

        let manifest = loaded.manifest();
        assert!(!manifest.locations().is_empty());
        assert_eq!(&manifest.columns()[manifest.len() - 3..], ["total_sqft", "bath", "bhk"]);
        assert!(loaded.fingerprint().is_some());

        let index = manifest.location_index("Indira Nagar").expect("known location");
        let x = manifest.feature_vector(index, 1000.0, 2.0, 2.0);
        let estimate = PriceEstimate::from_raw(loaded.model().predict(&x).expect("predict"));
        assert!(estimate.found());
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
