//! In-memory repositories shared by the service tests.
//!
//! One store backs goals, tasks and library items so cascades cross entity
//! boundaries the same way they do in SQLite. Goal references are not
//! enforced, which lets tests point a task at a goal that does not exist.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::{Error, Result};
use crate::goals::cascade::{self, GoalAdjustment};
use crate::goals::{Goal, GoalProgressChange, GoalRepositoryTrait, GoalUpdate, NewGoal};
use crate::library::{
    LibraryItem, LibraryItemFilter, LibraryItemMutation, LibraryItemRepositoryTrait,
    LibraryItemUpdate, NewLibraryItem,
};
use crate::tasks::{NewTask, Task, TaskFilter, TaskMutation, TaskRepositoryTrait, TaskUpdate};

pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[derive(Default)]
struct State {
    goals: BTreeMap<String, Goal>,
    tasks: BTreeMap<String, Task>,
    items: BTreeMap<String, LibraryItem>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn apply_all(
        &mut self,
        adjustments: Vec<GoalAdjustment>,
        now: NaiveDateTime,
    ) -> Vec<GoalProgressChange> {
        adjustments
            .iter()
            .filter_map(|adjustment| self.apply_one(adjustment, now))
            .collect()
    }

    fn apply_one(
        &mut self,
        adjustment: &GoalAdjustment,
        now: NaiveDateTime,
    ) -> Option<GoalProgressChange> {
        let goal = self.goals.get_mut(&adjustment.goal_id)?;
        let before = goal.progress();
        let after = cascade::apply_adjustment(&before, adjustment, now);
        goal.current_value = after.current_value;
        goal.completed_at = after.completed_at;
        goal.updated_at = now;
        Some(GoalProgressChange {
            goal_id: goal.id.clone(),
            previous_value: before.current_value,
            current_value: after.current_value,
            previous_completed_at: before.completed_at,
            completed_at: after.completed_at,
        })
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn goal(&self, goal_id: &str) -> Goal {
        self.lock().goals.get(goal_id).cloned().unwrap()
    }

    pub fn task(&self, task_id: &str) -> Task {
        self.lock().tasks.get(task_id).cloned().unwrap()
    }

    pub fn item(&self, item_id: &str) -> LibraryItem {
        self.lock().items.get(item_id).cloned().unwrap()
    }

    /// Inserts a task as-is, bypassing cascades.
    pub fn insert_task_raw(&self, task: Task) {
        self.lock().tasks.insert(task.id.clone(), task);
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        Ok(self.lock().goals.values().cloned().collect())
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.lock()
            .goals
            .get(goal_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
    }

    async fn insert_new_goal(&self, new_goal: NewGoal, now: NaiveDateTime) -> Result<Goal> {
        let mut state = self.lock();
        let id = state.next_id("goal");
        let goal = new_goal.into_goal(id.clone(), now);
        state.goals.insert(id, goal.clone());
        Ok(goal)
    }

    async fn update_goal(
        &self,
        goal_id: &str,
        update: GoalUpdate,
        now: NaiveDateTime,
    ) -> Result<Goal> {
        let mut state = self.lock();
        let current = state
            .goals
            .get(goal_id)
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))?;
        let next = update.apply_to(current, now)?;
        state.goals.insert(goal_id.to_string(), next.clone());
        Ok(next)
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let mut state = self.lock();
        if state.goals.remove(goal_id).is_none() {
            return Ok(0);
        }
        for task in state.tasks.values_mut() {
            if task.goal_id.as_deref() == Some(goal_id) {
                task.goal_id = None;
            }
        }
        for item in state.items.values_mut() {
            if item.goal_id.as_deref() == Some(goal_id) {
                item.goal_id = None;
            }
        }
        Ok(1)
    }

    async fn apply_adjustment(
        &self,
        adjustment: GoalAdjustment,
        now: NaiveDateTime,
    ) -> Result<Option<GoalProgressChange>> {
        Ok(self.lock().apply_one(&adjustment, now))
    }
}

#[async_trait]
impl TaskRepositoryTrait for InMemoryStore {
    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        Ok(self
            .lock()
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    fn get_by_id(&self, task_id: &str) -> Result<Task> {
        self.lock()
            .tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Task {}", task_id)))
    }

    async fn create(&self, new_task: NewTask, now: NaiveDateTime) -> Result<TaskMutation> {
        let mut state = self.lock();
        let id = state.next_id("task");
        let task = new_task.into_task(id.clone(), now);
        state.tasks.insert(id, task.clone());
        let goal_changes = state.apply_all(cascade::task_adjustments(None, Some(&task)), now);
        Ok(TaskMutation { task, goal_changes })
    }

    async fn update(
        &self,
        task_id: &str,
        update: TaskUpdate,
        now: NaiveDateTime,
    ) -> Result<TaskMutation> {
        let mut state = self.lock();
        let before = state
            .tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Task {}", task_id)))?;
        let task = update.apply_to(&before, now)?;
        state.tasks.insert(task_id.to_string(), task.clone());
        let goal_changes =
            state.apply_all(cascade::task_adjustments(Some(&before), Some(&task)), now);
        Ok(TaskMutation { task, goal_changes })
    }

    async fn delete(&self, task_id: &str, now: NaiveDateTime) -> Result<TaskMutation> {
        let mut state = self.lock();
        let task = state
            .tasks
            .remove(task_id)
            .ok_or_else(|| Error::NotFound(format!("Task {}", task_id)))?;
        let goal_changes = state.apply_all(cascade::task_adjustments(Some(&task), None), now);
        Ok(TaskMutation { task, goal_changes })
    }
}

#[async_trait]
impl LibraryItemRepositoryTrait for InMemoryStore {
    fn list(&self, filter: &LibraryItemFilter) -> Result<Vec<LibraryItem>> {
        Ok(self
            .lock()
            .items
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect())
    }

    fn get_by_id(&self, item_id: &str) -> Result<LibraryItem> {
        self.lock()
            .items
            .get(item_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Library item {}", item_id)))
    }

    async fn create(
        &self,
        new_item: NewLibraryItem,
        now: NaiveDateTime,
    ) -> Result<LibraryItemMutation> {
        let mut state = self.lock();
        let id = state.next_id("item");
        let item = new_item.into_item(id.clone(), now);
        state.items.insert(id, item.clone());
        let goal_changes =
            state.apply_all(cascade::library_item_adjustments(None, Some(&item)), now);
        Ok(LibraryItemMutation { item, goal_changes })
    }

    async fn update(
        &self,
        item_id: &str,
        update: LibraryItemUpdate,
        now: NaiveDateTime,
    ) -> Result<LibraryItemMutation> {
        let mut state = self.lock();
        let before = state
            .items
            .get(item_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Library item {}", item_id)))?;
        let item = update.apply_to(&before, now)?;
        state.items.insert(item_id.to_string(), item.clone());
        let goal_changes = state.apply_all(
            cascade::library_item_adjustments(Some(&before), Some(&item)),
            now,
        );
        Ok(LibraryItemMutation { item, goal_changes })
    }

    async fn delete(&self, item_id: &str, now: NaiveDateTime) -> Result<LibraryItemMutation> {
        let mut state = self.lock();
        let item = state
            .items
            .remove(item_id)
            .ok_or_else(|| Error::NotFound(format!("Library item {}", item_id)))?;
        let goal_changes =
            state.apply_all(cascade::library_item_adjustments(Some(&item), None), now);
        Ok(LibraryItemMutation { item, goal_changes })
    }
}
