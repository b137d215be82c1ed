use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::service_order_controller::ServiceOrderController;
use crate::dto::ApiResponse;
use crate::models::service_order::{
    CreateServiceOrderRequest, ServiceOrder, ServiceOrderFilters, UpdateServiceOrderRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_service_order_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_service_orders).post(create_service_order))
        .route(
            "/:id",
            get(get_service_order).patch(update_service_order).delete(delete_service_order),
        )
}

async fn list_service_orders(
    State(state): State<AppState>,
    Query(filters): Query<ServiceOrderFilters>,
) -> Result<Json<ApiResponse<Vec<ServiceOrder>>>, AppError> {
    let controller = ServiceOrderController::new(&state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_service_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ServiceOrder>>, AppError> {
    let controller = ServiceOrderController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_service_order(
    State(state): State<AppState>,
    Json(request): Json<CreateServiceOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceOrder>>), AppError> {
    let controller = ServiceOrderController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_service_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateServiceOrderRequest>,
) -> Result<Json<ApiResponse<ServiceOrder>>, AppError> {
    let controller = ServiceOrderController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_service_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let controller = ServiceOrderController::new(&state);
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
