use chrono::NaiveDateTime;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use lifeos_core::goals::cascade::library_item_adjustments;
use lifeos_core::library::{
    LibraryItem, LibraryItemFilter, LibraryItemMutation, LibraryItemRepositoryTrait,
    LibraryItemUpdate, NewLibraryItem,
};
use lifeos_core::{Error, Result};

use super::model::LibraryItemDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::goals::apply_adjustments;
use crate::schema::library_items;
use crate::utils::new_id;

pub struct LibraryItemRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LibraryItemRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_item(conn: &mut SqliteConnection, item_id: &str) -> Result<LibraryItem> {
    library_items::table
        .find(item_id)
        .select(LibraryItemDB::as_select())
        .first::<LibraryItemDB>(conn)
        .optional()
        .into_core()?
        .map(LibraryItem::from)
        .ok_or_else(|| Error::NotFound(format!("Library item {}", item_id)))
}

#[async_trait]
impl LibraryItemRepositoryTrait for LibraryItemRepository {
    fn list(&self, filter: &LibraryItemFilter) -> Result<Vec<LibraryItem>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = library_items::table
            .select(LibraryItemDB::as_select())
            .into_boxed();
        if let Some(goal_id) = &filter.goal_id {
            query = query.filter(library_items::goal_id.eq(goal_id.clone()));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(library_items::kind.eq(kind.as_str()));
        }
        let rows = query
            .order((library_items::created_at.asc(), library_items::id.asc()))
            .load::<LibraryItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(LibraryItem::from).collect())
    }

    fn get_by_id(&self, item_id: &str) -> Result<LibraryItem> {
        let mut conn = get_connection(&self.pool)?;
        find_item(&mut conn, item_id)
    }

    async fn create(
        &self,
        new_item: NewLibraryItem,
        now: NaiveDateTime,
    ) -> Result<LibraryItemMutation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<LibraryItemMutation> {
                let id = new_id(new_item.id.clone());
                let item = new_item.into_item(id, now);

                diesel::insert_into(library_items::table)
                    .values(LibraryItemDB::from(item.clone()))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let goal_changes =
                    apply_adjustments(conn, &library_item_adjustments(None, Some(&item)), now)?;
                Ok(LibraryItemMutation { item, goal_changes })
            })
            .await
    }

    async fn update(
        &self,
        item_id: &str,
        update: LibraryItemUpdate,
        now: NaiveDateTime,
    ) -> Result<LibraryItemMutation> {
        let item_id = item_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<LibraryItemMutation> {
                let before = find_item(conn, &item_id)?;
                let item = update.apply_to(&before, now)?;

                diesel::update(library_items::table.find(&item_id))
                    .set(&LibraryItemDB::from(item.clone()))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let goal_changes = apply_adjustments(
                    conn,
                    &library_item_adjustments(Some(&before), Some(&item)),
                    now,
                )?;
                Ok(LibraryItemMutation { item, goal_changes })
            })
            .await
    }

    async fn delete(&self, item_id: &str, now: NaiveDateTime) -> Result<LibraryItemMutation> {
        let item_id = item_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<LibraryItemMutation> {
                let item = find_item(conn, &item_id)?;

                diesel::delete(library_items::table.find(&item_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let goal_changes =
                    apply_adjustments(conn, &library_item_adjustments(Some(&item), None), now)?;
                Ok(LibraryItemMutation { item, goal_changes })
            })
            .await
    }
}
