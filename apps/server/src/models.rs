//! Request and response shapes specific to the HTTP layer.

use lifeos_core::goals::{Breakdown, Goal, GoalProgressChange};
use serde::{Deserialize, Serialize};

/// A goal, optionally with its pace breakdown at request time.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
    #[serde(flatten)]
    pub goal: Goal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalQuery {
    #[serde(default)]
    pub breakdown: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAdjustmentRequest {
    pub delta: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAdjustmentResponse {
    pub goal: GoalResponse,
    pub change: GoalProgressChange,
}
