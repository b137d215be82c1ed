//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle (vehículo o equipo) y sus variantes
//! para CRUD operations. Mapea a la tabla `vehicles`; los campos calculados de
//! mantenimiento nunca se guardan.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use validator::Validate;

use crate::utils::dates::DateInput;
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{normalize_optional, present, resolve_date, validate_not_blank};

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Active,
    Inactive,
    InService,
    AwaitingParts,
}

/// Columnas escribibles de la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct VehicleAttributes {
    pub serial_number: Option<i32>,
    pub status: VehicleStatus,
    pub name: String,
    pub company_id: i32,
    pub license_plate: String,
    pub trailer_license_plate: Option<String>,
    pub location_id: i32,
    pub vessel_plate_no: Option<String>,
    pub filter_install_date: Option<NaiveDate>,
    pub filter_validity_months: Option<i32>,
    pub annual_inspection_date: Option<NaiveDate>,
    pub filter_manual_expiry_date: Option<NaiveDate>,
    pub sensor_technology: Option<String>,
    pub sensor_service_date: Option<NaiveDate>,
    pub hose_hd63_replacement_date: Option<NaiveDate>,
    pub hose_hd38_replacement_date: Option<NaiveDate>,
    pub hose_tw75_replacement_date: Option<NaiveDate>,
    pub hose_leak_test_date: Option<NaiveDate>,
    pub volumetric_calibration_date: Option<NaiveDate>,
    pub manometer_calibration_date: Option<NaiveDate>,
    pub hecpv_ilcpv_test_date: Option<NaiveDate>,
    pub filter_type_plate_no: Option<String>,
    pub contact_info: Option<String>,
    pub note: Option<String>,
}

/// Vehicle tal como se lee, con los nombres de empresa y ubicación
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub id: i32,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attributes: VehicleAttributes,
    pub company_name: Option<String>,
    pub location_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filtros para listar vehículos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub company_id: Option<i32>,
    pub location_id: Option<i32>,
    pub status: Option<VehicleStatus>,
}

const MAX_FILTER_VALIDITY_MONTHS: i32 = 1200;

fn check_validity_months(months: Option<i32>) -> AppResult<()> {
    match months {
        Some(m) if !(1..=MAX_FILTER_VALIDITY_MONTHS).contains(&m) => Err(validation_error(
            "filter_validity_months",
            "Filter validity must be between 1 and 1200 months",
        )),
        _ => Ok(()),
    }
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub serial_number: Option<i32>,
    pub status: Option<VehicleStatus>,

    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: String,

    pub company_id: i32,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub license_plate: String,

    #[validate(length(max = 50))]
    pub trailer_license_plate: Option<String>,

    pub location_id: i32,

    #[validate(length(max = 100))]
    pub vessel_plate_no: Option<String>,

    #[serde(default)]
    pub filter_install_date: DateInput,
    pub filter_validity_months: Option<i32>,
    #[serde(default)]
    pub annual_inspection_date: DateInput,
    #[serde(default)]
    pub filter_manual_expiry_date: DateInput,
    pub sensor_technology: Option<String>,
    #[serde(default)]
    pub sensor_service_date: DateInput,
    #[serde(default)]
    pub hose_hd63_replacement_date: DateInput,
    #[serde(default)]
    pub hose_hd38_replacement_date: DateInput,
    #[serde(default)]
    pub hose_tw75_replacement_date: DateInput,
    #[serde(default)]
    pub hose_leak_test_date: DateInput,
    #[serde(default)]
    pub volumetric_calibration_date: DateInput,
    #[serde(default)]
    pub manometer_calibration_date: DateInput,
    #[serde(default)]
    pub hecpv_ilcpv_test_date: DateInput,
    pub filter_type_plate_no: Option<String>,
    pub contact_info: Option<String>,
    pub note: Option<String>,
}

impl CreateVehicleRequest {
    /// Validar y convertir a columnas escribibles
    pub fn into_attributes(self) -> AppResult<VehicleAttributes> {
        self.validate()?;
        check_validity_months(self.filter_validity_months)?;

        Ok(VehicleAttributes {
            serial_number: self.serial_number,
            status: self.status.unwrap_or_default(),
            name: self.name.trim().to_string(),
            company_id: self.company_id,
            license_plate: self.license_plate.trim().to_string(),
            trailer_license_plate: normalize_optional(self.trailer_license_plate),
            location_id: self.location_id,
            vessel_plate_no: normalize_optional(self.vessel_plate_no),
            filter_install_date: resolve_date(self.filter_install_date, "filter_install_date")?,
            filter_validity_months: self.filter_validity_months,
            annual_inspection_date: resolve_date(self.annual_inspection_date, "annual_inspection_date")?,
            filter_manual_expiry_date: resolve_date(
                self.filter_manual_expiry_date,
                "filter_manual_expiry_date",
            )?,
            sensor_technology: normalize_optional(self.sensor_technology),
            sensor_service_date: resolve_date(self.sensor_service_date, "sensor_service_date")?,
            hose_hd63_replacement_date: resolve_date(
                self.hose_hd63_replacement_date,
                "hose_hd63_replacement_date",
            )?,
            hose_hd38_replacement_date: resolve_date(
                self.hose_hd38_replacement_date,
                "hose_hd38_replacement_date",
            )?,
            hose_tw75_replacement_date: resolve_date(
                self.hose_tw75_replacement_date,
                "hose_tw75_replacement_date",
            )?,
            hose_leak_test_date: resolve_date(self.hose_leak_test_date, "hose_leak_test_date")?,
            volumetric_calibration_date: resolve_date(
                self.volumetric_calibration_date,
                "volumetric_calibration_date",
            )?,
            manometer_calibration_date: resolve_date(
                self.manometer_calibration_date,
                "manometer_calibration_date",
            )?,
            hecpv_ilcpv_test_date: resolve_date(self.hecpv_ilcpv_test_date, "hecpv_ilcpv_test_date")?,
            filter_type_plate_no: normalize_optional(self.filter_type_plate_no),
            contact_info: normalize_optional(self.contact_info),
            note: normalize_optional(self.note),
        })
    }
}

/// Request para actualizar un vehículo existente.
/// Campo ausente = sin cambios; `null` = borrar el valor.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[serde(default, deserialize_with = "present")]
    pub serial_number: Option<Option<i32>>,
    pub status: Option<VehicleStatus>,

    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: Option<String>,

    pub company_id: Option<i32>,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub license_plate: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub trailer_license_plate: Option<Option<String>>,
    pub location_id: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub vessel_plate_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub filter_install_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub filter_validity_months: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub annual_inspection_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub filter_manual_expiry_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub sensor_technology: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub sensor_service_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub hose_hd63_replacement_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub hose_hd38_replacement_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub hose_tw75_replacement_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub hose_leak_test_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub volumetric_calibration_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub manometer_calibration_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub hecpv_ilcpv_test_date: Option<DateInput>,
    #[serde(default, deserialize_with = "present")]
    pub filter_type_plate_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub contact_info: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub note: Option<Option<String>>,
}

fn patch_date(
    target: &mut Option<NaiveDate>,
    input: Option<DateInput>,
    field: &'static str,
) -> AppResult<()> {
    if let Some(input) = input {
        *target = resolve_date(input, field)?;
    }
    Ok(())
}

fn patch_text(target: &mut Option<String>, value: Option<Option<String>>) {
    if let Some(value) = value {
        *target = normalize_optional(value);
    }
}

impl UpdateVehicleRequest {
    /// Verdadero si el payload no trae ningún campo
    pub fn is_empty(&self) -> bool {
        self.serial_number.is_none()
            && self.status.is_none()
            && self.name.is_none()
            && self.company_id.is_none()
            && self.license_plate.is_none()
            && self.trailer_license_plate.is_none()
            && self.location_id.is_none()
            && self.vessel_plate_no.is_none()
            && self.filter_install_date.is_none()
            && self.filter_validity_months.is_none()
            && self.annual_inspection_date.is_none()
            && self.filter_manual_expiry_date.is_none()
            && self.sensor_technology.is_none()
            && self.sensor_service_date.is_none()
            && self.hose_hd63_replacement_date.is_none()
            && self.hose_hd38_replacement_date.is_none()
            && self.hose_tw75_replacement_date.is_none()
            && self.hose_leak_test_date.is_none()
            && self.volumetric_calibration_date.is_none()
            && self.manometer_calibration_date.is_none()
            && self.hecpv_ilcpv_test_date.is_none()
            && self.filter_type_plate_no.is_none()
            && self.contact_info.is_none()
            && self.note.is_none()
    }

    /// Aplicar los cambios sobre las columnas actuales
    pub fn apply_to(self, attributes: &mut VehicleAttributes) -> AppResult<()> {
        self.validate()?;
        if let Some(months) = self.filter_validity_months {
            check_validity_months(months)?;
        }

        if let Some(serial_number) = self.serial_number {
            attributes.serial_number = serial_number;
        }
        if let Some(status) = self.status {
            attributes.status = status;
        }
        if let Some(name) = self.name {
            attributes.name = name.trim().to_string();
        }
        if let Some(company_id) = self.company_id {
            attributes.company_id = company_id;
        }
        if let Some(license_plate) = self.license_plate {
            attributes.license_plate = license_plate.trim().to_string();
        }
        patch_text(&mut attributes.trailer_license_plate, self.trailer_license_plate);
        if let Some(location_id) = self.location_id {
            attributes.location_id = location_id;
        }
        patch_text(&mut attributes.vessel_plate_no, self.vessel_plate_no);
        patch_date(&mut attributes.filter_install_date, self.filter_install_date, "filter_install_date")?;
        if let Some(months) = self.filter_validity_months {
            attributes.filter_validity_months = months;
        }
        patch_date(
            &mut attributes.annual_inspection_date,
            self.annual_inspection_date,
            "annual_inspection_date",
        )?;
        patch_date(
            &mut attributes.filter_manual_expiry_date,
            self.filter_manual_expiry_date,
            "filter_manual_expiry_date",
        )?;
        patch_text(&mut attributes.sensor_technology, self.sensor_technology);
        patch_date(&mut attributes.sensor_service_date, self.sensor_service_date, "sensor_service_date")?;
        patch_date(
            &mut attributes.hose_hd63_replacement_date,
            self.hose_hd63_replacement_date,
            "hose_hd63_replacement_date",
        )?;
        patch_date(
            &mut attributes.hose_hd38_replacement_date,
            self.hose_hd38_replacement_date,
            "hose_hd38_replacement_date",
        )?;
        patch_date(
            &mut attributes.hose_tw75_replacement_date,
            self.hose_tw75_replacement_date,
            "hose_tw75_replacement_date",
        )?;
        patch_date(&mut attributes.hose_leak_test_date, self.hose_leak_test_date, "hose_leak_test_date")?;
        patch_date(
            &mut attributes.volumetric_calibration_date,
            self.volumetric_calibration_date,
            "volumetric_calibration_date",
        )?;
        patch_date(
            &mut attributes.manometer_calibration_date,
            self.manometer_calibration_date,
            "manometer_calibration_date",
        )?;
        patch_date(
            &mut attributes.hecpv_ilcpv_test_date,
            self.hecpv_ilcpv_test_date,
            "hecpv_ilcpv_test_date",
        )?;
        patch_text(&mut attributes.filter_type_plate_no, self.filter_type_plate_no);
        patch_text(&mut attributes.contact_info, self.contact_info);
        patch_text(&mut attributes.note, self.note);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use serde_json::json;

    fn create_request(body: serde_json::Value) -> CreateVehicleRequest {
        serde_json::from_value(body).unwrap()
    }

    fn minimal() -> serde_json::Value {
        json!({
            "name": " Autocisterna 1 ",
            "company_id": 1,
            "license_plate": "ZG-1234-AB",
            "location_id": 2
        })
    }

    #[test]
    fn test_create_defaults_status_and_trims() {
        let attributes = create_request(minimal()).into_attributes().unwrap();
        assert_eq!(attributes.status, VehicleStatus::Active);
        assert_eq!(attributes.name, "Autocisterna 1");
        assert_eq!(attributes.filter_install_date, None);
    }

    #[test]
    fn test_create_rejects_unparseable_date() {
        let mut body = minimal();
        body["filter_install_date"] = json!("31/12/2024");
        let result = create_request(body).into_attributes();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_create_rejects_blank_plate() {
        let mut body = minimal();
        body["license_plate"] = json!("   ");
        assert!(create_request(body).into_attributes().is_err());
    }

    #[test]
    fn test_create_rejects_zero_validity() {
        let mut body = minimal();
        body["filter_validity_months"] = json!(0);
        assert!(create_request(body).into_attributes().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let status: VehicleStatus = serde_json::from_value(json!("awaiting_parts")).unwrap();
        assert_eq!(status, VehicleStatus::AwaitingParts);
        assert_eq!(serde_json::to_value(VehicleStatus::InService).unwrap(), json!("in_service"));
    }

    #[test]
    fn test_update_clears_and_sets_fields() {
        let mut attributes = create_request(json!({
            "name": "Autocisterna 1",
            "company_id": 1,
            "license_plate": "ZG-1234-AB",
            "location_id": 2,
            "note": "stara napomena",
            "hose_leak_test_date": "2024-01-10"
        }))
        .into_attributes()
        .unwrap();

        let patch: UpdateVehicleRequest = serde_json::from_value(json!({
            "note": null,
            "hose_leak_test_date": "2024-07-10",
            "status": "in_service"
        }))
        .unwrap();
        assert!(!patch.is_empty());
        patch.apply_to(&mut attributes).unwrap();

        assert_eq!(attributes.note, None);
        assert_eq!(attributes.hose_leak_test_date, NaiveDate::from_ymd_opt(2024, 7, 10));
        assert_eq!(attributes.status, VehicleStatus::InService);
        assert_eq!(attributes.license_plate, "ZG-1234-AB");
    }

    #[test]
    fn test_update_empty_payload() {
        let patch: UpdateVehicleRequest = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
    }
}
