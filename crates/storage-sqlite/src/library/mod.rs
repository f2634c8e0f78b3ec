//! SQLite storage implementation for library items.

mod model;
mod repository;

pub use model::LibraryItemDB;
pub use repository::LibraryItemRepository;
