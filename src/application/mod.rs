//! Application layer: Use cases and services.
//!
//! Orchestrates domain logic with ports to answer the location and price
//! queries.

mod artifact_store;

pub use artifact_store::{ArtifactStore, LoadedArtifacts};
