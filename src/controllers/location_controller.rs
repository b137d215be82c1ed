use std::sync::Arc;
use tracing::info;

use crate::dto::ApiResponse;
use crate::models::location::{CreateLocationRequest, Location, UpdateLocationRequest};
use crate::repositories::{LocationRepository, VehicleRepository};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct LocationController {
    repository: Arc<dyn LocationRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl LocationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.locations.clone(),
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Location>>, AppError> {
        let locations = self.repository.list().await?;
        Ok(ApiResponse::collection(locations))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ApiResponse<Location>, AppError> {
        let location = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Location", id))?;

        Ok(ApiResponse::success(location))
    }

    pub async fn create(&self, request: CreateLocationRequest) -> Result<ApiResponse<Location>, AppError> {
        let attributes = request.into_attributes()?;
        let location = self.repository.create(&attributes).await?;
        info!("📍 Ubicación creada: {} (id {})", location.attributes.name, location.id);

        Ok(ApiResponse::success_with_message(
            location,
            "Location created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateLocationRequest,
    ) -> Result<ApiResponse<Location>, AppError> {
        if request.is_empty() {
            return Err(bad_request_error("No fields provided for update"));
        }

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Location", id))?;

        let mut attributes = current.attributes;
        request.apply_to(&mut attributes)?;

        let location = self
            .repository
            .update(id, &attributes)
            .await?
            .ok_or_else(|| not_found_error("Location", id))?;

        Ok(ApiResponse::success_with_message(
            location,
            "Location updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Location", id));
        }

        let vehicles = self.vehicles.count_by_location(id).await?;
        if vehicles > 0 {
            return Err(AppError::Conflict(format!(
                "Location with id '{}' still has {} vehicle(s)",
                id, vehicles
            )));
        }

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Location", id));
        }
        info!("🗑️ Ubicación eliminada: id {}", id);
        Ok(())
    }
}
