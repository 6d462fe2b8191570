pub mod actions;
pub mod config;
pub mod kernel;
pub mod server;
pub mod services;

// Re-export specific items if needed for convenient access
pub use actions::{Action, ActionRegistry, Tracker};
pub use kernel::triage::{decide, Decision, TriageEngine};
