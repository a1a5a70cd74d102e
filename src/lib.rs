//! # homeprice
//!
//! House price prediction service backed by an exported regression model.
//!
//! The service loads a feature column manifest and a linear model from disk,
//! then answers two queries over HTTP: the known locations, and a price
//! estimate for a property described by square footage, bedrooms, bathrooms
//! and location.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Manifest, feature vector layout, query coercion, estimates
//! - `ports`: Trait definitions for the model and artifact loading
//! - `adapters`: Concrete implementations (linear model, filesystem, actix-web)
//! - `application`: The load-once artifact store
//! - `config`: Environment-driven server settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::ArtifactStore;
pub use domain::{PriceEstimate, PriceQuery};

/// Result type for homeprice operations
pub type Result<T> = std::result::Result<T, HomepriceError>;

/// Main error type for homeprice
#[derive(Debug, thiserror::Error)]
pub enum HomepriceError {
    #[error("Artifact load failed: {0}")]
    ArtifactLoad(#[from] ports::ArtifactError),

    #[error("Invalid request: {0}")]
    MissingField(#[from] domain::QueryError),

    #[error("Model error: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Artifacts not loaded")]
    NotLoaded,

    #[error("Blocking task failed: {0}")]
    Blocking(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
