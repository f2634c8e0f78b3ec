//! Goals module - domain models, pace breakdown, cascade rules, services, and traits.

pub mod breakdown;
pub mod cascade;
mod goals_model;
mod goals_service;
mod goals_traits;

#[cfg(test)]
mod goals_service_tests;

pub use breakdown::{calculate_breakdown, Breakdown, BreakdownInput};
pub use cascade::{CompletionEffect, GoalAdjustment};
pub use goals_model::{Goal, GoalProgress, GoalProgressChange, GoalType, GoalUpdate, NewGoal};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
