use chrono::NaiveDateTime;
use log::{debug, warn};
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text, Timestamp};
use diesel::SqliteConnection;

use lifeos_core::goals::cascade::{self, GoalAdjustment};
use lifeos_core::goals::{Goal, GoalProgressChange, GoalRepositoryTrait, GoalUpdate, NewGoal};
use lifeos_core::{Error, Result};

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::goals;
use crate::utils::new_id;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn find_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<Option<GoalDB>> {
    goals::table
        .find(goal_id)
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .into_core()
}

const INCREMENT_SQL: &str = "UPDATE goals \
     SET current_value = MIN(2147483647, MAX(0, current_value + ?)), updated_at = ? \
     WHERE id = ?";

/// Applies progress adjustments on the caller's connection.
///
/// Meant to run inside a writer job so the adjustments commit together with
/// the write that caused them. The value moves in a single clamped `UPDATE`;
/// `completed_at` is then decided from the row as read back in the same
/// transaction. Goals that no longer exist are skipped.
pub(crate) fn apply_adjustments(
    conn: &mut SqliteConnection,
    adjustments: &[GoalAdjustment],
    now: NaiveDateTime,
) -> Result<Vec<GoalProgressChange>> {
    let mut changes = Vec::with_capacity(adjustments.len());
    for adjustment in adjustments {
        let Some(before) = find_goal(conn, &adjustment.goal_id)? else {
            warn!(
                "Skipping progress adjustment for missing goal {}",
                adjustment.goal_id
            );
            continue;
        };

        let touched = diesel::sql_query(INCREMENT_SQL)
            .bind::<Integer, _>(adjustment.delta)
            .bind::<Timestamp, _>(now)
            .bind::<Text, _>(&adjustment.goal_id)
            .execute(conn)
            .map_err(StorageError::from)?;
        if touched == 0 {
            warn!("Goal {} vanished during adjustment", adjustment.goal_id);
            continue;
        }

        let after = find_goal(conn, &adjustment.goal_id)?
            .ok_or_else(|| Error::NotFound(format!("Goal {}", adjustment.goal_id)))?;
        let completed_at = cascade::resolve_completion(adjustment.effect, &after.progress(), now);
        if completed_at != after.completed_at {
            diesel::update(goals::table.find(&after.id))
                .set(goals::completed_at.eq(completed_at))
                .execute(conn)
                .map_err(StorageError::from)?;
        }

        debug!(
            "Goal {} progress {} -> {} (completed_at {:?} -> {:?})",
            after.id, before.current_value, after.current_value, before.completed_at, completed_at
        );
        changes.push(GoalProgressChange {
            goal_id: after.id,
            previous_value: before.current_value,
            current_value: after.current_value,
            previous_completed_at: before.completed_at,
            completed_at,
        });
    }
    Ok(changes)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .select(GoalDB::as_select())
            .order((goals::created_at.asc(), goals::id.asc()))
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        find_goal(&mut conn, goal_id)?
            .map(Goal::from)
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
    }

    async fn insert_new_goal(&self, new_goal: NewGoal, now: NaiveDateTime) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let id = new_id(new_goal.id.clone());
                let goal_db = GoalDB::from(new_goal.into_goal(id, now));

                let result_db = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn update_goal(
        &self,
        goal_id: &str,
        update: GoalUpdate,
        now: NaiveDateTime,
    ) -> Result<Goal> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let current = find_goal(conn, &goal_id)?
                    .map(Goal::from)
                    .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))?;
                let next = update.apply_to(&current, now)?;

                let result_db = diesel::update(goals::table.find(&goal_id))
                    .set(&GoalDB::from(next))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Linked tasks and library items are unlinked by ON DELETE SET NULL.
                Ok(diesel::delete(goals::table.find(goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn apply_adjustment(
        &self,
        adjustment: GoalAdjustment,
        now: NaiveDateTime,
    ) -> Result<Option<GoalProgressChange>> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Option<GoalProgressChange>> {
                    Ok(apply_adjustments(conn, &[adjustment], now)?.pop())
                },
            )
            .await
    }
}
