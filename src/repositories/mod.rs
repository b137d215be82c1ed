//! Repositories module
//!
//! Acceso a datos detrás de traits asíncronos. Los controllers sólo conocen
//! los traits; la implementación PostgreSQL vive en cada `*_repository.rs`.

pub mod company_repository;
pub mod location_repository;
pub mod service_order_repository;
pub mod vehicle_repository;

use async_trait::async_trait;

use crate::models::company::{Company, CompanyAttributes};
use crate::models::location::{Location, LocationAttributes};
use crate::models::service_order::{ServiceOrder, ServiceOrderAttributes, ServiceOrderFilters};
use crate::models::vehicle::{Vehicle, VehicleAttributes, VehicleFilters};
use crate::utils::errors::AppResult;

pub use company_repository::PgCompanyRepository;
pub use location_repository::PgLocationRepository;
pub use service_order_repository::PgServiceOrderRepository;
pub use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Todas las empresas, ordenadas por nombre
    async fn list(&self) -> AppResult<Vec<Company>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Company>>;
    /// Error `Conflict` si el nombre ya existe
    async fn create(&self, attributes: &CompanyAttributes) -> AppResult<Company>;
    /// `None` si la empresa no existe
    async fn update(&self, id: i32, attributes: &CompanyAttributes) -> AppResult<Option<Company>>;
    /// Verdadero si se borró una fila
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Location>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Location>>;
    async fn create(&self, attributes: &LocationAttributes) -> AppResult<Location>;
    async fn update(&self, id: i32, attributes: &LocationAttributes) -> AppResult<Option<Location>>;
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Vehículos filtrados, ordenados por nombre, con empresa y ubicación
    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>>;
    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>>;
    /// Error `Conflict` si la matrícula ya existe
    async fn create(&self, attributes: &VehicleAttributes) -> AppResult<Vehicle>;
    async fn update(&self, id: i32, attributes: &VehicleAttributes) -> AppResult<Option<Vehicle>>;
    async fn delete(&self, id: i32) -> AppResult<bool>;
    async fn count_by_company(&self, company_id: i32) -> AppResult<i64>;
    async fn count_by_location(&self, location_id: i32) -> AppResult<i64>;
}

#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    /// Órdenes filtradas, de la más reciente a la más antigua
    async fn list(&self, filters: &ServiceOrderFilters) -> AppResult<Vec<ServiceOrder>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceOrder>>;
    async fn create(&self, attributes: &ServiceOrderAttributes) -> AppResult<ServiceOrder>;
    async fn update(&self, id: i32, attributes: &ServiceOrderAttributes) -> AppResult<Option<ServiceOrder>>;
    async fn delete(&self, id: i32) -> AppResult<bool>;
    async fn count_by_vehicle(&self, vehicle_id: i32) -> AppResult<i64>;
}
