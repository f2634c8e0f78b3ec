//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};

use lifeos_core::goals::{Goal, GoalProgress, GoalType};

/// Database model for goals
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub goal_type: String,
    pub target_value: Option<i32>,
    pub current_value: i32,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl GoalDB {
    pub fn progress(&self) -> GoalProgress {
        GoalProgress {
            current_value: self.current_value,
            target_value: self.target_value,
            completed_at: self.completed_at,
        }
    }
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        let goal_type = db.goal_type.parse::<GoalType>().unwrap_or_else(|_| {
            warn!(
                "Goal {} has unknown type '{}', treating it as {}",
                db.id,
                db.goal_type,
                GoalType::default()
            );
            GoalType::default()
        });
        Self {
            id: db.id,
            title: db.title,
            description: db.description,
            goal_type,
            target_value: db.target_value,
            current_value: db.current_value,
            start_date: db.start_date,
            due_date: db.due_date,
            completed_at: db.completed_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            title: domain.title,
            description: domain.description,
            goal_type: domain.goal_type.as_str().to_string(),
            target_value: domain.target_value,
            current_value: domain.current_value,
            start_date: domain.start_date,
            due_date: domain.due_date,
            completed_at: domain.completed_at,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
