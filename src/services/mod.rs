//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.
//! Los cálculos de mantenimiento son puros y no tocan la base de datos.

pub mod maintenance_service;

pub use maintenance_service::*;
