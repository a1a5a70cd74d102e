//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundaries between the application and the
//! concrete model backend and artifact storage.

mod artifact_source;
mod price_model;

pub use artifact_source::{ArtifactError, ArtifactFingerprint, ArtifactSource, Artifacts};
pub use price_model::{ModelError, PriceModel};
