//! Reloj inyectable
//!
//! Los cálculos de mantenimiento sólo necesitan "hoy" como fecha. El reloj se
//! lee una vez por cálculo para que todos los días restantes sean coherentes.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Fecha local del servidor
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Reloj detenido en una fecha concreta
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
