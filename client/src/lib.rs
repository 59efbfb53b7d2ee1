//! Startup Planner client
//!
//! Native client for the Startup Planner API: configuration, the HTTP API
//! client, file-backed local storage and the orchestrators behind each
//! screen. The `planner` binary is a thin command-line front end over this
//! library.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{ApiError, ApiResult, AppError, AppResult};
pub use storage::FileStore;
