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
use lifeos_core::library::{
    LibraryItem, LibraryItemFilter, LibraryItemMutation, LibraryItemUpdate, NewLibraryItem,
};

#[utoipa::path(
    get,
    path = "/api/v1/library-items",
    params(
        ("goalId" = Option<String>, Query, description = "Only items linked to this goal"),
        ("kind" = Option<String>, Query, description = "BOOK, ARTICLE, VIDEO, PODCAST, COURSE, NOTE or OTHER")
    ),
    responses((status = 200, description = "Matching library items"))
)]
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    ApiQuery(filter): ApiQuery<LibraryItemFilter>,
) -> ApiResult<Json<Vec<LibraryItem>>> {
    Ok(Json(state.library_service.get_items(&filter)?))
}

#[utoipa::path(
    post,
    path = "/api/v1/library-items",
    responses(
        (status = 201, description = "Item created, with any goal progress it caused"),
        (status = 409, description = "Linked goal does not exist")
    )
)]
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    ApiJson(new_item): ApiJson<NewLibraryItem>,
) -> ApiResult<(StatusCode, Json<LibraryItemMutation>)> {
    let mutation = state.library_service.create_item(new_item).await?;
    Ok((StatusCode::CREATED, Json(mutation)))
}

#[utoipa::path(
    get,
    path = "/api/v1/library-items/{id}",
    params(("id" = String, Path, description = "Library item id")),
    responses((status = 200, description = "Library item"), (status = 404, description = "Unknown item"))
)]
pub async fn get_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LibraryItem>> {
    Ok(Json(state.library_service.get_item(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/v1/library-items/{id}",
    params(("id" = String, Path, description = "Library item id")),
    responses(
        (status = 200, description = "Updated item, with any goal progress it caused"),
        (status = 404, description = "Unknown item")
    )
)]
pub async fn update_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<LibraryItemUpdate>,
) -> ApiResult<Json<LibraryItemMutation>> {
    Ok(Json(state.library_service.update_item(&id, update).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/library-items/{id}",
    params(("id" = String, Path, description = "Library item id")),
    responses(
        (status = 200, description = "Deleted item, with any goal progress it caused"),
        (status = 404, description = "Unknown item")
    )
)]
pub async fn delete_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LibraryItemMutation>> {
    Ok(Json(state.library_service.delete_item(&id).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/library-items", get(list_items).post(create_item))
        .route(
            "/library-items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}
