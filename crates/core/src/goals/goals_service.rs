use log::debug;
use std::sync::Arc;

use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::goals::breakdown::Breakdown;
use crate::goals::cascade::manual_adjustment;
use crate::goals::goals_model::{Goal, GoalProgressChange, GoalUpdate, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::utils::time_utils::Clock;
use async_trait::async_trait;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    clock: Arc<dyn Clock>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl GoalService {
    pub fn new(goal_repo: Arc<dyn GoalRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        GoalService {
            goal_repo,
            clock,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        self.goal_repo.load_goals()
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.goal_repo.get_goal(goal_id)
    }

    fn breakdown_for(&self, goal: &Goal) -> Breakdown {
        goal.breakdown(self.clock.now())
    }

    fn get_breakdown(&self, goal_id: &str) -> Result<Breakdown> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        Ok(self.breakdown_for(&goal))
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;
        let goal = self
            .goal_repo
            .insert_new_goal(new_goal, self.clock.now())
            .await?;
        self.event_sink
            .emit(DomainEvent::goals_changed(vec![goal.id.clone()]));
        Ok(goal)
    }

    async fn update_goal(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        let goal = self
            .goal_repo
            .update_goal(goal_id, update, self.clock.now())
            .await?;
        self.event_sink
            .emit(DomainEvent::goals_changed(vec![goal.id.clone()]));
        Ok(goal)
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let deleted = self.goal_repo.delete_goal(goal_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        self.event_sink.emit(DomainEvent::goal_deleted(goal_id));
        Ok(deleted)
    }

    async fn adjust_progress(&self, goal_id: &str, delta: i32) -> Result<GoalProgressChange> {
        if delta == 0 {
            return Err(Error::invalid_input("delta must be non-zero"));
        }
        let change = self
            .goal_repo
            .apply_adjustment(manual_adjustment(goal_id, delta), self.clock.now())
            .await?
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))?;
        debug!(
            "Goal {} adjusted by {}: {} -> {}",
            goal_id, delta, change.previous_value, change.current_value
        );
        self.event_sink
            .emit(DomainEvent::goal_progress_changed(&change));
        Ok(change)
    }
}
