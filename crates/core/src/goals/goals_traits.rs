use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::goals::breakdown::Breakdown;
use crate::goals::cascade::GoalAdjustment;
use crate::goals::goals_model::{Goal, GoalProgressChange, GoalUpdate, NewGoal};
use async_trait::async_trait;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    async fn insert_new_goal(&self, new_goal: NewGoal, now: NaiveDateTime) -> Result<Goal>;
    /// Applies `update` to the stored row inside one write transaction.
    async fn update_goal(&self, goal_id: &str, update: GoalUpdate, now: NaiveDateTime)
        -> Result<Goal>;
    /// Deletes the goal. Linked tasks and library items keep existing with
    /// their `goal_id` cleared.
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
    /// Applies a progress adjustment atomically. Returns `None` when the goal
    /// no longer exists.
    async fn apply_adjustment(
        &self,
        adjustment: GoalAdjustment,
        now: NaiveDateTime,
    ) -> Result<Option<GoalProgressChange>>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;
    /// Breakdown of `goal` against the service clock.
    fn breakdown_for(&self, goal: &Goal) -> Breakdown;
    fn get_breakdown(&self, goal_id: &str) -> Result<Breakdown>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
    /// Manual `+delta`/`-delta` on a goal's progress.
    async fn adjust_progress(&self, goal_id: &str, delta: i32) -> Result<GoalProgressChange>;
}
