//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    CompanyRepository, LocationRepository, PgCompanyRepository, PgLocationRepository,
    PgServiceOrderRepository, PgVehicleRepository, ServiceOrderRepository, VehicleRepository,
};
use crate::utils::clock::{Clock, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub companies: Arc<dyn CompanyRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub service_orders: Arc<dyn ServiceOrderRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Estado de producción respaldado por PostgreSQL
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            config,
            companies: Arc::new(PgCompanyRepository::new(pool.clone())),
            locations: Arc::new(PgLocationRepository::new(pool.clone())),
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            service_orders: Arc::new(PgServiceOrderRepository::new(pool)),
            clock: Arc::new(SystemClock),
        }
    }

    /// Sustituir el reloj (fecha fija en pruebas)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
