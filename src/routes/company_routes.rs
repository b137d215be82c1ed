use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::dto::ApiResponse;
use crate::models::company::{Company, CreateCompanyRequest, UpdateCompanyRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).patch(update_company).delete(delete_company),
        )
}

async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Company>>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Company>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Company>>), AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<Company>>, AppError> {
    let controller = CompanyController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let controller = CompanyController::new(&state);
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
