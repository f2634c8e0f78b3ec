//! Content library module - domain models, services, and traits.

mod library_model;
mod library_service;
mod library_traits;


pub use library_model::{
    LibraryItem, LibraryItemFilter, LibraryItemKind, LibraryItemMutation, LibraryItemUpdate,
    NewLibraryItem,
};
pub use library_service::LibraryItemService;
pub use library_traits::{LibraryItemRepositoryTrait, LibraryItemServiceTrait};
