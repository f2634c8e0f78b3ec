use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::library::library_model::{
    LibraryItem, LibraryItemFilter, LibraryItemMutation, LibraryItemUpdate, NewLibraryItem,
};
use async_trait::async_trait;

/// Trait for library item repository operations.
///
/// Writes apply the implied goal adjustments in the same transaction.
#[async_trait]
pub trait LibraryItemRepositoryTrait: Send + Sync {
    fn list(&self, filter: &LibraryItemFilter) -> Result<Vec<LibraryItem>>;
    fn get_by_id(&self, item_id: &str) -> Result<LibraryItem>;
    async fn create(&self, new_item: NewLibraryItem, now: NaiveDateTime)
        -> Result<LibraryItemMutation>;
    async fn update(
        &self,
        item_id: &str,
        update: LibraryItemUpdate,
        now: NaiveDateTime,
    ) -> Result<LibraryItemMutation>;
    async fn delete(&self, item_id: &str, now: NaiveDateTime) -> Result<LibraryItemMutation>;
}

/// Trait for library item service operations
#[async_trait]
pub trait LibraryItemServiceTrait: Send + Sync {
    fn get_items(&self, filter: &LibraryItemFilter) -> Result<Vec<LibraryItem>>;
    fn get_item(&self, item_id: &str) -> Result<LibraryItem>;
    async fn create_item(&self, new_item: NewLibraryItem) -> Result<LibraryItemMutation>;
    async fn update_item(
        &self,
        item_id: &str,
        update: LibraryItemUpdate,
    ) -> Result<LibraryItemMutation>;
    async fn delete_item(&self, item_id: &str) -> Result<LibraryItemMutation>;
}
