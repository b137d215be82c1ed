use std::sync::Arc;
use tracing::info;

use crate::dto::ApiResponse;
use crate::models::company::{Company, CreateCompanyRequest, UpdateCompanyRequest};
use crate::repositories::{CompanyRepository, VehicleRepository};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct CompanyController {
    repository: Arc<dyn CompanyRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl CompanyController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.companies.clone(),
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Company>>, AppError> {
        let companies = self.repository.list().await?;
        Ok(ApiResponse::collection(companies))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<ApiResponse<Company>, AppError> {
        let company = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", id))?;

        Ok(ApiResponse::success(company))
    }

    pub async fn create(&self, request: CreateCompanyRequest) -> Result<ApiResponse<Company>, AppError> {
        let attributes = request.into_attributes()?;
        let company = self.repository.create(&attributes).await?;
        info!("🏢 Empresa creada: {} (id {})", company.attributes.name, company.id);

        Ok(ApiResponse::success_with_message(
            company,
            "Company created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateCompanyRequest,
    ) -> Result<ApiResponse<Company>, AppError> {
        if request.is_empty() {
            return Err(bad_request_error("No fields provided for update"));
        }

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", id))?;

        let mut attributes = current.attributes;
        request.apply_to(&mut attributes)?;

        let company = self
            .repository
            .update(id, &attributes)
            .await?
            .ok_or_else(|| not_found_error("Company", id))?;

        Ok(ApiResponse::success_with_message(
            company,
            "Company updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found_error("Company", id));
        }

        let vehicles = self.vehicles.count_by_company(id).await?;
        if vehicles > 0 {
            return Err(AppError::Conflict(format!(
                "Company with id '{}' still has {} vehicle(s)",
                id, vehicles
            )));
        }

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Company", id));
        }
        info!("🗑️ Empresa eliminada: id {}", id);
        Ok(())
    }
}
