use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::location_controller::LocationController;
use crate::dto::ApiResponse;
use crate::models::location::{CreateLocationRequest, Location, UpdateLocationRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route(
            "/:id",
            get(get_location).patch(update_location).delete(delete_location),
        )
}

async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Location>>>, AppError> {
    let controller = LocationController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Location>>, AppError> {
    let controller = LocationController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_location(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Location>>), AppError> {
    let controller = LocationController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateLocationRequest>,
) -> Result<Json<ApiResponse<Location>>, AppError> {
    let controller = LocationController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let controller = LocationController::new(&state);
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
