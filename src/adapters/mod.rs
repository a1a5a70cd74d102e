//! Adapters layer: Concrete implementations of ports.
//!
//! - `linear`: JSON-exported linear regression model
//! - `fs`: artifact files on the local filesystem
//! - `http`: actix-web routes

pub mod fs;
pub mod http;
pub mod linear;
