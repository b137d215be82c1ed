//! Cálculo de vencimientos de mantenimiento
//!
//! Deriva, para cada vehículo o equipo, cuántos días faltan para cada tarea
//! de mantenimiento (filtro, inspección anual, mangueras, calibraciones).
//! Todo es puro: la única entrada ambiental es "hoy", leída una vez por
//! llamada desde el `Clock`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::vehicle::{Vehicle, VehicleAttributes};
use crate::utils::clock::Clock;
use crate::utils::dates::{add_months, add_years, days_from_today, DateInput};

/// Días de aviso por defecto antes de un vencimiento
pub const DEFAULT_WARNING_DAYS: i64 = 30;

/// Fechas de origen de un registro, resueltas en la frontera
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceDates {
    pub filter_install_date: DateInput,
    pub filter_validity_months: Option<i32>,
    pub filter_manual_expiry_date: DateInput,
    pub annual_inspection_date: DateInput,
    pub hose_hd63_replacement_date: DateInput,
    pub hose_hd38_replacement_date: DateInput,
    pub hose_tw75_replacement_date: DateInput,
    pub hose_leak_test_date: DateInput,
    pub sensor_service_date: DateInput,
    pub volumetric_calibration_date: DateInput,
    pub manometer_calibration_date: DateInput,
    pub hecpv_ilcpv_test_date: DateInput,
}

impl From<&VehicleAttributes> for MaintenanceDates {
    fn from(vehicle: &VehicleAttributes) -> Self {
        Self {
            filter_install_date: vehicle.filter_install_date.into(),
            filter_validity_months: vehicle.filter_validity_months,
            filter_manual_expiry_date: vehicle.filter_manual_expiry_date.into(),
            annual_inspection_date: vehicle.annual_inspection_date.into(),
            hose_hd63_replacement_date: vehicle.hose_hd63_replacement_date.into(),
            hose_hd38_replacement_date: vehicle.hose_hd38_replacement_date.into(),
            hose_tw75_replacement_date: vehicle.hose_tw75_replacement_date.into(),
            hose_leak_test_date: vehicle.hose_leak_test_date.into(),
            sensor_service_date: vehicle.sensor_service_date.into(),
            volumetric_calibration_date: vehicle.volumetric_calibration_date.into(),
            manometer_calibration_date: vehicle.manometer_calibration_date.into(),
            hecpv_ilcpv_test_date: vehicle.hecpv_ilcpv_test_date.into(),
        }
    }
}

/// Tareas de mantenimiento con seguimiento de vencimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceCategory {
    FilterReplacement,
    AnnualInspection,
    HoseHd63Replacement,
    HoseHd38Replacement,
    HoseTw75Replacement,
    HoseLeakTest,
    SensorCalibration,
    VolumetricCalibration,
    ManometerCalibration,
    HecpvIlcpvTest,
}

impl MaintenanceCategory {
    /// Nombre estable usado en JSON (`days_to_<key>`)
    pub fn key(self) -> &'static str {
        match self {
            MaintenanceCategory::FilterReplacement => "filter_replacement",
            MaintenanceCategory::AnnualInspection => "annual_inspection",
            MaintenanceCategory::HoseHd63Replacement => "hose_hd63_replacement",
            MaintenanceCategory::HoseHd38Replacement => "hose_hd38_replacement",
            MaintenanceCategory::HoseTw75Replacement => "hose_tw75_replacement",
            MaintenanceCategory::HoseLeakTest => "hose_leak_test",
            MaintenanceCategory::SensorCalibration => "sensor_calibration",
            MaintenanceCategory::VolumetricCalibration => "volumetric_calibration",
            MaintenanceCategory::ManometerCalibration => "manometer_calibration",
            MaintenanceCategory::HecpvIlcpvTest => "hecpv_ilcpv_test",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalUnit {
    Months,
    Years,
}

/// Una fila de la tabla de recurrencias
#[derive(Clone, Copy)]
pub struct MaintenanceScheduleEntry {
    pub category: MaintenanceCategory,
    pub source_field: &'static str,
    pub source: fn(&MaintenanceDates) -> &DateInput,
    pub interval_value: i32,
    pub interval_unit: IntervalUnit,
}

impl MaintenanceScheduleEntry {
    /// Próximo vencimiento a partir de la fecha de origen
    pub fn due_date(&self, dates: &MaintenanceDates) -> Option<NaiveDate> {
        let start = (self.source)(dates).date()?;
        match self.interval_unit {
            IntervalUnit::Months => add_months(start, self.interval_value),
            IntervalUnit::Years => add_years(start, self.interval_value),
        }
    }
}

// Intervalos heredados del sistema de origen; varios son supuestos
// (volumetro, manómetros, HECPV/ILCPV) y se conservan tal cual.
pub const MAINTENANCE_SCHEDULE: [MaintenanceScheduleEntry; 8] = [
    MaintenanceScheduleEntry {
        category: MaintenanceCategory::HoseHd63Replacement,
        source_field: "hose_hd63_replacement_date",
        source: |d| &d.hose_hd63_replacement_date,
        interval_value: 10,
        interval_unit: IntervalUnit::Years,
    },
    MaintenanceScheduleEntry {
        category: MaintenanceCategory::HoseHd38Replacement,
        source_field: "hose_hd38_replacement_date",
        source: |d| &d.hose_hd38_replacement_date,
        interval_value: 10,
        interval_unit: IntervalUnit::Years,
    },
    MaintenanceScheduleEntry {
        category: MaintenanceCategory::HoseTw75Replacement,
        source_field: "hose_tw75_replacement_date",
        source: |d| &d.hose_tw75_replacement_date,
        interval_value: 10,
        interval_unit: IntervalUnit::Years,
    },
    MaintenanceScheduleEntry {
        category: MaintenanceCategory::HoseLeakTest,
        source_field: "hose_leak_test_date",
        source: |d| &d.hose_leak_test_date,
        interval_value: 6,
        interval_unit: IntervalUnit::Months,
    },
    MaintenanceScheduleEntry {
        category: MaintenanceCategory::SensorCalibration,
        source_field: "sensor_service_date",
        source: |d| &d.sensor_service_date,
        interval_value: 1,
        interval_unit: IntervalUnit::Years,
    },
    MaintenanceScheduleEntry {
        category: MaintenanceCategory::VolumetricCalibration,
        source_field: "volumetric_calibration_date",
        source: |d| &d.volumetric_calibration_date,
        interval_value: 1,
        interval_unit: IntervalUnit::Years,
    },
    MaintenanceScheduleEntry {
        category: MaintenanceCategory::ManometerCalibration,
        source_field: "manometer_calibration_date",
        source: |d| &d.manometer_calibration_date,
        interval_value: 1,
        interval_unit: IntervalUnit::Years,
    },
    MaintenanceScheduleEntry {
        category: MaintenanceCategory::HecpvIlcpvTest,
        source_field: "hecpv_ilcpv_test_date",
        source: |d| &d.hecpv_ilcpv_test_date,
        interval_value: 5,
        interval_unit: IntervalUnit::Years,
    },
];

/// Vencimiento del filtro: la fecha manual válida gana; si no,
/// instalación + meses de validez. Una validez de 0 cuenta como no configurada.
pub fn resolve_filter_expiry(
    install_date: &DateInput,
    validity_months: Option<i32>,
    manual_expiry_date: &DateInput,
) -> Option<NaiveDate> {
    if let Some(manual) = manual_expiry_date.date() {
        return Some(manual);
    }
    match (install_date.date(), validity_months) {
        (Some(installed), Some(months)) if months != 0 => add_months(installed, months),
        _ => None,
    }
}

/// Resultado de una tarea concreta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceCheck {
    pub category: MaintenanceCategory,
    pub due_date: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
}

/// Evaluar todas las tareas para una fecha "hoy" dada
pub fn compute_checks(dates: &MaintenanceDates, today: NaiveDate) -> Vec<MaintenanceCheck> {
    let check = |category, due_date: Option<NaiveDate>| MaintenanceCheck {
        category,
        due_date,
        days_remaining: due_date.map(|due| days_from_today(due, today)),
    };

    let mut checks = Vec::with_capacity(MAINTENANCE_SCHEDULE.len() + 2);
    checks.push(check(
        MaintenanceCategory::FilterReplacement,
        resolve_filter_expiry(
            &dates.filter_install_date,
            dates.filter_validity_months,
            &dates.filter_manual_expiry_date,
        ),
    ));
    // La fecha de inspección ya es el vencimiento
    checks.push(check(
        MaintenanceCategory::AnnualInspection,
        dates.annual_inspection_date.date(),
    ));
    checks.extend(
        MAINTENANCE_SCHEDULE
            .iter()
            .map(|entry| check(entry.category, entry.due_date(dates))),
    );
    checks
}

/// Campos calculados que se añaden a cada vehículo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceStatus {
    pub filter_expiry_date: Option<NaiveDate>,
    pub days_to_filter_replacement: Option<i64>,
    pub days_to_annual_inspection: Option<i64>,
    pub days_to_hose_hd63_replacement: Option<i64>,
    pub days_to_hose_hd38_replacement: Option<i64>,
    pub days_to_hose_tw75_replacement: Option<i64>,
    pub days_to_hose_leak_test: Option<i64>,
    pub days_to_sensor_calibration: Option<i64>,
    pub days_to_volumetric_calibration: Option<i64>,
    pub days_to_manometer_calibration: Option<i64>,
    pub days_to_hecpv_ilcpv_test: Option<i64>,
}

impl MaintenanceStatus {
    pub fn from_checks(checks: &[MaintenanceCheck]) -> Self {
        let mut status = MaintenanceStatus::default();
        for check in checks {
            let days = check.days_remaining;
            match check.category {
                MaintenanceCategory::FilterReplacement => {
                    status.filter_expiry_date = check.due_date;
                    status.days_to_filter_replacement = days;
                }
                MaintenanceCategory::AnnualInspection => status.days_to_annual_inspection = days,
                MaintenanceCategory::HoseHd63Replacement => status.days_to_hose_hd63_replacement = days,
                MaintenanceCategory::HoseHd38Replacement => status.days_to_hose_hd38_replacement = days,
                MaintenanceCategory::HoseTw75Replacement => status.days_to_hose_tw75_replacement = days,
                MaintenanceCategory::HoseLeakTest => status.days_to_hose_leak_test = days,
                MaintenanceCategory::SensorCalibration => status.days_to_sensor_calibration = days,
                MaintenanceCategory::VolumetricCalibration => status.days_to_volumetric_calibration = days,
                MaintenanceCategory::ManometerCalibration => status.days_to_manometer_calibration = days,
                MaintenanceCategory::HecpvIlcpvTest => status.days_to_hecpv_ilcpv_test = days,
            }
        }
        status
    }
}

/// Vehículo con sus campos calculados, listo para serializar
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(flatten)]
    pub maintenance: MaintenanceStatus,
}

pub fn enrich_with_today(vehicle: &Vehicle, today: NaiveDate) -> EnrichedVehicle {
    let dates = MaintenanceDates::from(&vehicle.attributes);
    EnrichedVehicle {
        vehicle: vehicle.clone(),
        maintenance: MaintenanceStatus::from_checks(&compute_checks(&dates, today)),
    }
}

/// Enriquecer un registro; el reloj se lee una sola vez
pub fn enrich_record(vehicle: &Vehicle, clock: &dyn Clock) -> EnrichedVehicle {
    enrich_with_today(vehicle, clock.today())
}

/// Enriquecer un listado con la misma fecha "hoy" para todos
pub fn enrich_records(vehicles: &[Vehicle], clock: &dyn Clock) -> Vec<EnrichedVehicle> {
    let today = clock.today();
    vehicles
        .iter()
        .map(|vehicle| enrich_with_today(vehicle, today))
        .collect()
}

/// Clasificación de los días restantes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    DueSoon,
    Ok,
}

impl Urgency {
    pub fn classify(days_remaining: i64, warning_days: i64) -> Self {
        if days_remaining < 0 {
            Urgency::Overdue
        } else if days_remaining < warning_days {
            Urgency::DueSoon
        } else {
            Urgency::Ok
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueItem {
    pub category: MaintenanceCategory,
    pub due_date: NaiveDate,
    pub days_remaining: i64,
    pub urgency: Urgency,
}

/// Tareas que vencen dentro de `within_days`, de la más urgente a la menos
pub fn due_items(checks: &[MaintenanceCheck], within_days: i64, warning_days: i64) -> Vec<DueItem> {
    let mut items: Vec<DueItem> = checks
        .iter()
        .filter_map(|check| {
            let due_date = check.due_date?;
            let days_remaining = check.days_remaining?;
            (days_remaining <= within_days).then(|| DueItem {
                category: check.category,
                due_date,
                days_remaining,
                urgency: Urgency::classify(days_remaining, warning_days),
            })
        })
        .collect();
    items.sort_by_key(|item| item.days_remaining);
    items
}

/// Vehículo con tareas pendientes
#[derive(Debug, Clone, Serialize)]
pub struct VehicleDueSummary {
    pub vehicle_id: i32,
    pub name: String,
    pub license_plate: String,
    pub company_name: Option<String>,
    pub location_name: Option<String>,
    pub items: Vec<DueItem>,
}

/// Listado de vencimientos de una flota, ordenado por la tarea más urgente
pub fn due_summaries(
    vehicles: &[Vehicle],
    clock: &dyn Clock,
    within_days: i64,
    warning_days: i64,
) -> Vec<VehicleDueSummary> {
    let today = clock.today();
    let mut summaries: Vec<VehicleDueSummary> = vehicles
        .iter()
        .filter_map(|vehicle| {
            let dates = MaintenanceDates::from(&vehicle.attributes);
            let items = due_items(&compute_checks(&dates, today), within_days, warning_days);
            if items.is_empty() {
                return None;
            }
            Some(VehicleDueSummary {
                vehicle_id: vehicle.id,
                name: vehicle.attributes.name.clone(),
                license_plate: vehicle.attributes.license_plate.clone(),
                company_name: vehicle.company_name.clone(),
                location_name: vehicle.location_name.clone(),
                items,
            })
        })
        .collect();
    summaries.sort_by_key(|summary| summary.items.first().map(|item| item.days_remaining));
    summaries
}
