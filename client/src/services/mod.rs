//! Orchestrators driving the planner screens

pub mod competitors;
pub mod dashboard;
pub mod profile;
pub mod session;

pub use competitors::CompetitorResearch;
pub use dashboard::{Dashboard, LoadStatus, MountHandle, LOAD_FAILURE};
pub use profile::ProfileSettings;
pub use session::{LoginOutcome, SessionService};
