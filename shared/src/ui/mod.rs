//! Presentational state for the dashboard widgets
//!
//! Each widget is a plain state machine; rendering is left to the front end.

pub mod action_bar;
pub mod form_dialog;
pub mod overview;
pub mod selector;
pub mod wizard;

pub use action_bar::*;
pub use form_dialog::*;
pub use overview::*;
pub use selector::*;
pub use wizard::*;
