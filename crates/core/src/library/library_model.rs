//! Content library domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::goals::GoalProgressChange;
use crate::utils::{validate_goal_ref, validate_title};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryItemKind {
    Book,
    Article,
    Video,
    Podcast,
    Course,
    Note,
    #[default]
    Other,
}

impl LibraryItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryItemKind::Book => "BOOK",
            LibraryItemKind::Article => "ARTICLE",
            LibraryItemKind::Video => "VIDEO",
            LibraryItemKind::Podcast => "PODCAST",
            LibraryItemKind::Course => "COURSE",
            LibraryItemKind::Note => "NOTE",
            LibraryItemKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for LibraryItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryItemKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOOK" => Ok(LibraryItemKind::Book),
            "ARTICLE" => Ok(LibraryItemKind::Article),
            "VIDEO" => Ok(LibraryItemKind::Video),
            "PODCAST" => Ok(LibraryItemKind::Podcast),
            "COURSE" => Ok(LibraryItemKind::Course),
            "NOTE" => Ok(LibraryItemKind::Note),
            "OTHER" => Ok(LibraryItemKind::Other),
            other => Err(Error::invalid_input(format!(
                "Unknown library item kind '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a library item. Linking it to a goal counts
/// one unit of progress for as long as the link exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: String,
    pub title: String,
    pub kind: LibraryItemKind,
    pub url: Option<String>,
    pub goal_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new library item
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewLibraryItem {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub kind: LibraryItemKind,
    pub url: Option<String>,
    pub goal_id: Option<String>,
}

impl NewLibraryItem {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_goal_ref(self.goal_id.as_deref())
    }

    pub fn into_item(self, id: String, now: NaiveDateTime) -> LibraryItem {
        LibraryItem {
            id,
            title: self.title.trim().to_string(),
            kind: self.kind,
            url: self.url,
            goal_id: self.goal_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a library item.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LibraryItemKind>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub url: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub goal_id: Option<Option<String>>,
}

impl LibraryItemUpdate {
    pub fn relink(goal_id: Option<&str>) -> Self {
        Self {
            goal_id: Some(goal_id.map(str::to_string)),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(goal_id) = &self.goal_id {
            validate_goal_ref(goal_id.as_deref())?;
        }
        Ok(())
    }

    pub fn apply_to(&self, item: &LibraryItem, now: NaiveDateTime) -> Result<LibraryItem> {
        self.validate()?;
        let mut next = item.clone();
        if let Some(title) = &self.title {
            next.title = title.trim().to_string();
        }
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(url) = &self.url {
            next.url = url.clone();
        }
        if let Some(goal_id) = &self.goal_id {
            next.goal_id = goal_id.clone();
        }
        next.updated_at = now;
        Ok(next)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItemFilter {
    pub goal_id: Option<String>,
    pub kind: Option<LibraryItemKind>,
}

impl LibraryItemFilter {
    pub fn matches(&self, item: &LibraryItem) -> bool {
        self.goal_id
            .as_deref()
            .map_or(true, |goal_id| item.goal_id.as_deref() == Some(goal_id))
            && self.kind.map_or(true, |kind| item.kind == kind)
    }
}

/// Result of a library item write, with the goal progress it moved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItemMutation {
    pub item: LibraryItem,
    pub goal_changes: Vec<GoalProgressChange>,
}

