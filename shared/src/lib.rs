//! Shared types and state models for the Startup Planner client
//!
//! This crate contains the domain models, validation rules, persisted
//! client state and presentational state machines shared between the
//! native client and the browser front end (via WASM).

pub mod models;
pub mod preferences;
pub mod store;
pub mod types;
pub mod ui;
pub mod validation;

pub use models::*;
pub use preferences::*;
pub use store::*;
pub use types::*;
pub use validation::*;
