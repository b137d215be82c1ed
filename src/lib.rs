//! Fleet maintenance backend
//!
//! Registro de empresas, ubicaciones, vehículos y órdenes de servicio, con
//! el cálculo de días restantes para cada tarea de mantenimiento.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
