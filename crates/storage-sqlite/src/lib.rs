//! SQLite storage implementation for LifeOS.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `lifeos-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for goals, tasks and library items
//! - Database-specific model types (with Diesel derives)
//!
//! All writes go through a single writer actor. A task or library item write
//! and the goal progress adjustments it implies run in one `BEGIN IMMEDIATE`
//! transaction, so concurrent cascades against the same goal serialize and
//! never lose an increment.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod goals;
pub mod library;
pub mod tasks;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use goals::GoalRepository;
pub use library::LibraryItemRepository;
pub use tasks::TaskRepository;

// Re-export from lifeos-core for convenience
pub use lifeos_core::errors::{DatabaseError, Error, Result};
