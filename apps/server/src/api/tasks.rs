use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::{
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    main_lib::AppState,
};
use lifeos_core::tasks::{NewTask, Task, TaskFilter, TaskMutation, TaskUpdate};

#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    params(
        ("goalId" = Option<String>, Query, description = "Only tasks linked to this goal"),
        ("status" = Option<String>, Query, description = "TODO, IN_PROGRESS, BLOCKED or DONE")
    ),
    responses((status = 200, description = "Matching tasks"))
)]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<TaskFilter>,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.task_service.get_tasks(&filter)?))
}

#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    responses(
        (status = 201, description = "Task created, with any goal progress it caused"),
        (status = 409, description = "Linked goal does not exist")
    )
)]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ApiJson(new_task): ApiJson<NewTask>,
) -> ApiResult<(StatusCode, Json<TaskMutation>)> {
    let mutation = state.task_service.create_task(new_task).await?;
    Ok((StatusCode::CREATED, Json(mutation)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses((status = 200, description = "Task"), (status = 404, description = "Unknown task"))
)]
pub async fn get_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.task_service.get_task(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Updated task, with any goal progress it caused"),
        (status = 404, description = "Unknown task")
    )
)]
pub async fn update_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<TaskUpdate>,
) -> ApiResult<Json<TaskMutation>> {
    Ok(Json(state.task_service.update_task(&id, update).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Deleted task, with any goal progress it caused"),
        (status = 404, description = "Unknown task")
    )
)]
pub async fn delete_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TaskMutation>> {
    Ok(Json(state.task_service.delete_task(&id).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
