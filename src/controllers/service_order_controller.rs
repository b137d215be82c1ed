use std::sync::Arc;
use tracing::info;

use crate::dto::ApiResponse;
use crate::models::service_order::{
    CreateServiceOrderRequest, ServiceOrder, ServiceOrderFilters, UpdateServiceOrderRequest,
    VehicleRef,
};
use crate::repositories::{ServiceOrderRepository, VehicleRepository};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct ServiceOrderController {
    repository: Arc<dyn ServiceOrderRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl ServiceOrderController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.service_orders.clone(),
            vehicles: state.vehicles.clone(),
        }
    }

    /// Resolver el vehículo por id o por matrícula
    async fn resolve_vehicle(&self, vehicle: VehicleRef) -> Result<i32, AppError> {
        let found = match &vehicle {
            VehicleRef::Id(id) => self.vehicles.find_by_id(*id).await?,
            VehicleRef::LicensePlate(plate) => self.vehicles.find_by_license_plate(plate).await?,
        };

        match (found, vehicle) {
            (Some(v), _) => Ok(v.id),
            (None, VehicleRef::Id(id)) => Err(AppError::BadRequest(format!(
                "Vehicle with id '{}' does not exist",
                id
            ))),
            (None, VehicleRef::LicensePlate(plate)) => Err(AppError::BadRequest(format!(
                "Vehicle with license_plate '{}' does not exist",
                plate
            ))),
        }
    }

    pub async fn list(
        &self,
        filters: ServiceOrderFilters,
    ) -> Result<ApiResponse<Vec<ServiceOrder>>, AppError> {
        let orders = self.repository.list(&filters).await?;
        Ok(ApiResponse::collection(orders))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ApiResponse<ServiceOrder>, AppError> {
        let order = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service order", id))?;

        Ok(ApiResponse::success(order))
    }

    pub async fn create(
        &self,
        request: CreateServiceOrderRequest,
    ) -> Result<ApiResponse<ServiceOrder>, AppError> {
        let vehicle_id = self.resolve_vehicle(request.vehicle_ref()?).await?;
        let attributes = request.into_attributes(vehicle_id)?;

        let order = self.repository.create(&attributes).await?;
        info!(
            "🧾 Orden de servicio creada: id {} para vehículo {} ({})",
            order.id, vehicle_id, order.attributes.service_date
        );

        Ok(ApiResponse::success_with_message(
            order,
            "Service order created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateServiceOrderRequest,
    ) -> Result<ApiResponse<ServiceOrder>, AppError> {
        if request.is_empty() {
            return Err(bad_request_error("No fields provided for update"));
        }

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service order", id))?;

        let mut attributes = current.attributes;
        request.apply_to(&mut attributes)?;

        let order = self
            .repository
            .update(id, &attributes)
            .await?
            .ok_or_else(|| not_found_error("Service order", id))?;

        Ok(ApiResponse::success_with_message(
            order,
            "Service order updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Service order", id));
        }
        info!("🗑️ Orden de servicio eliminada: id {}", id);
        Ok(())
    }
}
