//! LifeOS Core - Domain entities, services, and traits.
//!
//! Goals, tasks and library items, plus the rules that keep a goal's progress
//! in step with the work linked to it. This crate is database-agnostic; the
//! repository traits are implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod events;
pub mod goals;
pub mod library;
pub mod tasks;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
