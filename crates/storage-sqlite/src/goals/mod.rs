//! SQLite storage implementation for goals.

mod model;
mod repository;

pub use model::GoalDB;
pub use repository::GoalRepository;
pub(crate) use repository::apply_adjustments;
