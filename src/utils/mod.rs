//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! aritmética de fechas y el reloj inyectable.

pub mod clock;
pub mod dates;
pub mod errors;
pub mod validation;
