//! Domain models for the Startup Planner client

mod account;
mod auth;
mod business;
mod competitor;

pub use account::*;
pub use auth::*;
pub use business::*;
pub use competitor::*;
