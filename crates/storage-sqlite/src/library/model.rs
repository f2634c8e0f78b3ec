use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;

use lifeos_core::library::{LibraryItem, LibraryItemKind};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::library_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct LibraryItemDB {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub url: Option<String>,
    pub goal_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<LibraryItemDB> for LibraryItem {
    fn from(db: LibraryItemDB) -> Self {
        let kind = db.kind.parse::<LibraryItemKind>().unwrap_or_else(|_| {
            warn!("Library item {} has unknown kind '{}'", db.id, db.kind);
            LibraryItemKind::default()
        });
        Self {
            id: db.id,
            title: db.title,
            kind,
            url: db.url,
            goal_id: db.goal_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<LibraryItem> for LibraryItemDB {
    fn from(domain: LibraryItem) -> Self {
        Self {
            id: domain.id,
            title: domain.title,
            kind: domain.kind.as_str().to_string(),
            url: domain.url,
            goal_id: domain.goal_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
