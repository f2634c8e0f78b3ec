use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    main_lib::AppState,
    models::{GoalQuery, GoalResponse, ProgressAdjustmentRequest, ProgressAdjustmentResponse},
};
use lifeos_core::goals::{Breakdown, Goal, GoalUpdate, NewGoal};

fn goal_response(state: &AppState, goal: Goal, with_breakdown: bool) -> GoalResponse {
    let breakdown = with_breakdown.then(|| state.goal_service.breakdown_for(&goal));
    GoalResponse { goal, breakdown }
}

#[utoipa::path(
    get,
    path = "/api/v1/goals",
    params(("breakdown" = Option<bool>, Query, description = "Include the pace breakdown")),
    responses((status = 200, description = "All goals"))
)]
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<GoalQuery>,
) -> ApiResult<Json<Vec<GoalResponse>>> {
    let goals = state.goal_service.get_goals()?;
    Ok(Json(
        goals
            .into_iter()
            .map(|goal| goal_response(&state, goal, query.breakdown))
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/goals",
    responses((status = 201, description = "Goal created"), (status = 400, description = "Invalid goal"))
)]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    ApiJson(new_goal): ApiJson<NewGoal>,
) -> ApiResult<(StatusCode, Json<GoalResponse>)> {
    let goal = state.goal_service.create_goal(new_goal).await?;
    Ok((StatusCode::CREATED, Json(goal_response(&state, goal, true))))
}

#[utoipa::path(
    get,
    path = "/api/v1/goals/{id}",
    params(
        ("id" = String, Path, description = "Goal id"),
        ("breakdown" = Option<bool>, Query, description = "Include the pace breakdown")
    ),
    responses((status = 200, description = "Goal"), (status = 404, description = "Unknown goal"))
)]
pub async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<GoalQuery>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = state.goal_service.get_goal(&id)?;
    Ok(Json(goal_response(&state, goal, query.breakdown)))
}

#[utoipa::path(
    put,
    path = "/api/v1/goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    responses((status = 200, description = "Updated goal"), (status = 404, description = "Unknown goal"))
)]
pub async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<GoalUpdate>,
) -> ApiResult<Json<GoalResponse>> {
    let goal = state.goal_service.update_goal(&id, update).await?;
    Ok(Json(goal_response(&state, goal, true)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/goals/{id}",
    params(("id" = String, Path, description = "Goal id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Unknown goal"))
)]
pub async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/goals/{id}/progress",
    params(("id" = String, Path, description = "Goal id")),
    responses(
        (status = 200, description = "Progress adjusted"),
        (status = 400, description = "Zero delta"),
        (status = 404, description = "Unknown goal")
    )
)]
pub async fn adjust_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ProgressAdjustmentRequest>,
) -> ApiResult<Json<ProgressAdjustmentResponse>> {
    let change = state.goal_service.adjust_progress(&id, request.delta).await?;
    let goal = state.goal_service.get_goal(&id)?;
    Ok(Json(ProgressAdjustmentResponse {
        goal: goal_response(&state, goal, true),
        change,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/goals/{id}/breakdown",
    params(("id" = String, Path, description = "Goal id")),
    responses((status = 200, description = "Pace breakdown"), (status = 404, description = "Unknown goal"))
)]
pub async fn get_breakdown(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Breakdown>> {
    Ok(Json(state.goal_service.get_breakdown(&id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/progress", post(adjust_progress))
        .route("/goals/{id}/breakdown", get(get_breakdown))
}
