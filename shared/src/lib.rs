//! Shared types and models for the Hyperlocal Intelligence Platform
//!
//! This crate contains the domain model (locations, parametric triggers,
//! weather readings, forecasts and alerts) together with the pure
//! validation rules applied when triggers are registered.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
