use std::sync::Arc;
use tracing::{debug, info};

use crate::dto::{ApiResponse, DueMaintenanceQuery};
use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleAttributes, VehicleFilters,
};
use crate::repositories::{
    CompanyRepository, LocationRepository, ServiceOrderRepository, VehicleRepository,
};
use crate::services::maintenance_service::{
    due_summaries, enrich_record, enrich_records, EnrichedVehicle, VehicleDueSummary,
};
use crate::state::AppState;
use crate::utils::clock::Clock;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
    companies: Arc<dyn CompanyRepository>,
    locations: Arc<dyn LocationRepository>,
    service_orders: Arc<dyn ServiceOrderRepository>,
    clock: Arc<dyn Clock>,
    warning_days: i64,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.vehicles.clone(),
            companies: state.companies.clone(),
            locations: state.locations.clone(),
            service_orders: state.service_orders.clone(),
            clock: state.clock.clone(),
            warning_days: state.config.maintenance_warning_days,
        }
    }

    /// La empresa y la ubicación referenciadas deben existir
    async fn check_references(&self, attributes: &VehicleAttributes) -> Result<(), AppError> {
        if self.companies.find_by_id(attributes.company_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Company with id '{}' does not exist",
                attributes.company_id
            )));
        }
        if self.locations.find_by_id(attributes.location_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Location with id '{}' does not exist",
                attributes.location_id
            )));
        }
        Ok(())
    }

    pub async fn list(
        &self,
        filters: VehicleFilters,
    ) -> Result<ApiResponse<Vec<EnrichedVehicle>>, AppError> {
        let vehicles = self.repository.list(&filters).await?;
        debug!("🚚 {} vehículos encontrados con filtros {:?}", vehicles.len(), filters);
        Ok(ApiResponse::collection(enrich_records(&vehicles, self.clock.as_ref())))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ApiResponse<EnrichedVehicle>, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(ApiResponse::success(enrich_record(&vehicle, self.clock.as_ref())))
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<EnrichedVehicle>, AppError> {
        let attributes = request.into_attributes()?;
        self.check_references(&attributes).await?;

        let vehicle = self.repository.create(&attributes).await?;
        info!(
            "🚚 Vehículo creado: {} [{}] (id {})",
            vehicle.attributes.name, vehicle.attributes.license_plate, vehicle.id
        );

        Ok(ApiResponse::success_with_message(
            enrich_record(&vehicle, self.clock.as_ref()),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<EnrichedVehicle>, AppError> {
        if request.is_empty() {
            return Err(bad_request_error("No fields provided for update"));
        }

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let references_changed = request.company_id.is_some() || request.location_id.is_some();
        let mut attributes = current.attributes;
        request.apply_to(&mut attributes)?;
        if references_changed {
            self.check_references(&attributes).await?;
        }

        let vehicle = self
            .repository
            .update(id, &attributes)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(ApiResponse::success_with_message(
            enrich_record(&vehicle, self.clock.as_ref()),
            "Vehicle updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Vehicle", id));
        }

        let orders = self.service_orders.count_by_vehicle(id).await?;
        if orders > 0 {
            return Err(AppError::Conflict(format!(
                "Vehicle with id '{}' still has {} service order(s)",
                id, orders
            )));
        }

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", id));
        }
        info!("🗑️ Vehículo eliminado: id {}", id);
        Ok(())
    }

    /// Vehículos con alguna tarea que vence dentro del horizonte;
    /// por defecto el horizonte es la ventana de aviso
    pub async fn due_maintenance(
        &self,
        query: DueMaintenanceQuery,
    ) -> Result<ApiResponse<Vec<VehicleDueSummary>>, AppError> {
        let within_days = query.within_days.unwrap_or(self.warning_days);
        if within_days < 0 {
            return Err(bad_request_error("within_days must not be negative"));
        }

        let filters = VehicleFilters {
            company_id: query.company_id,
            location_id: query.location_id,
            status: query.status,
        };
        let vehicles = self.repository.list(&filters).await?;
        let summaries = due_summaries(&vehicles, self.clock.as_ref(), within_days, self.warning_days);
        debug!(
            "🔧 {} de {} vehículos con mantenimiento en {} días",
            summaries.len(),
            vehicles.len(),
            within_days
        );

        Ok(ApiResponse::collection(summaries))
    }
}
