//! Store Commands
//!
//! Async operations against the remote document store, organized by domain.
//! Every command takes the store as a parameter so tests can pass an in-memory one.

mod person;
mod task;

// Re-export all public items
pub use person::*;
pub use task::*;
