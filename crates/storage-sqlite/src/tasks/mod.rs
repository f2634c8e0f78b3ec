//! SQLite storage implementation for tasks.

mod model;
mod repository;

pub use model::TaskDB;
pub use repository::TaskRepository;
