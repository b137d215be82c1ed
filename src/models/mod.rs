//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean
//! al schema PostgreSQL y los payloads de creación/actualización.

pub mod company;
pub mod location;
pub mod service_order;
pub mod vehicle;
