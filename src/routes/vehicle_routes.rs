use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::{ApiResponse, DueMaintenanceQuery};
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::services::maintenance_service::{EnrichedVehicle, VehicleDueSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/maintenance/due", get(due_maintenance))
        .route(
            "/:id",
            get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<ApiResponse<Vec<EnrichedVehicle>>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn due_maintenance(
    State(state): State<AppState>,
    Query(query): Query<DueMaintenanceQuery>,
) -> Result<Json<ApiResponse<Vec<VehicleDueSummary>>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.due_maintenance(query).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EnrichedVehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EnrichedVehicle>>), AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<EnrichedVehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
