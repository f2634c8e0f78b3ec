use log::debug;
use std::sync::Arc;

use super::library_model::{
    LibraryItem, LibraryItemFilter, LibraryItemMutation, LibraryItemUpdate, NewLibraryItem,
};
use super::library_traits::{LibraryItemRepositoryTrait, LibraryItemServiceTrait};
use crate::errors::Result;
use crate::events::{distinct_goal_ids, DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::utils::time_utils::Clock;
use async_trait::async_trait;

pub struct LibraryItemService {
    repository: Arc<dyn LibraryItemRepositoryTrait>,
    clock: Arc<dyn Clock>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl LibraryItemService {
    pub fn new(repository: Arc<dyn LibraryItemRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    fn emit_mutation(&self, mutation: &LibraryItemMutation) {
        let goal_ids = distinct_goal_ids(
            std::iter::once(mutation.item.goal_id.as_deref()).chain(
                mutation
                    .goal_changes
                    .iter()
                    .map(|change| Some(change.goal_id.as_str())),
            ),
        );
        let mut events = vec![DomainEvent::library_items_changed(
            vec![mutation.item.id.clone()],
            goal_ids,
        )];
        events.extend(
            mutation
                .goal_changes
                .iter()
                .map(DomainEvent::goal_progress_changed),
        );
        self.event_sink.emit_batch(events);
    }
}

#[async_trait]
impl LibraryItemServiceTrait for LibraryItemService {
    fn get_items(&self, filter: &LibraryItemFilter) -> Result<Vec<LibraryItem>> {
        self.repository.list(filter)
    }

    fn get_item(&self, item_id: &str) -> Result<LibraryItem> {
        self.repository.get_by_id(item_id)
    }

    async fn create_item(&self, new_item: NewLibraryItem) -> Result<LibraryItemMutation> {
        new_item.validate()?;
        let mutation = self.repository.create(new_item, self.clock.now()).await?;
        debug!("Created library item {}", mutation.item.id);
        self.emit_mutation(&mutation);
        Ok(mutation)
    }

    async fn update_item(
        &self,
        item_id: &str,
        update: LibraryItemUpdate,
    ) -> Result<LibraryItemMutation> {
        update.validate()?;
        let mutation = self
            .repository
            .update(item_id, update, self.clock.now())
            .await?;
        debug!(
            "Updated library item {} ({} goal change(s))",
            item_id,
            mutation.goal_changes.len()
        );
        self.emit_mutation(&mutation);
        Ok(mutation)
    }

    async fn delete_item(&self, item_id: &str) -> Result<LibraryItemMutation> {
        let mutation = self.repository.delete(item_id, self.clock.now()).await?;
        debug!("Deleted library item {}", item_id);
        self.emit_mutation(&mutation);
        Ok(mutation)
    }
}
