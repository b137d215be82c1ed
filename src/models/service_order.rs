//! Modelo de ServiceOrder
//!
//! Órdenes de servicio registradas contra un vehículo o equipo.
//! Mapea a la tabla `service_orders`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::dates::DateInput;
use crate::utils::errors::{bad_request_error, AppResult};
use crate::utils::validation::{
    normalize_optional, present, require_date, validate_cost, validate_not_blank,
};

/// Columnas escribibles de la tabla service_orders
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ServiceOrderAttributes {
    pub vehicle_id: i32,
    pub service_date: NaiveDate,
    pub order_number: Option<String>,
    pub description: String,
    pub materials_used: Option<String>,
    pub cost: Option<Decimal>,
    pub is_operational: bool,
    pub note: Option<String>,
}

/// Orden de servicio con un resumen del vehículo asociado
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ServiceOrder {
    pub id: i32,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attributes: ServiceOrderAttributes,
    pub vehicle_name: Option<String>,
    pub license_plate: Option<String>,
    pub company_name: Option<String>,
    pub location_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filtros para listar órdenes de servicio
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceOrderFilters {
    pub vehicle_id: Option<i32>,
}

/// Cómo identifica el payload al vehículo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleRef {
    Id(i32),
    LicensePlate(String),
}

/// Request para crear una orden de servicio.
/// El vehículo se indica con `vehicle_id` o con `license_plate`, nunca ambos.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceOrderRequest {
    pub vehicle_id: Option<i32>,
    pub license_plate: Option<String>,

    #[serde(default)]
    pub service_date: DateInput,

    #[validate(length(max = 100))]
    pub order_number: Option<String>,

    #[validate(custom = "validate_not_blank")]
    pub description: String,

    pub materials_used: Option<String>,

    #[validate(custom = "validate_cost")]
    pub cost: Option<Decimal>,

    pub is_operational: Option<bool>,
    pub note: Option<String>,
}

impl CreateServiceOrderRequest {
    pub fn vehicle_ref(&self) -> AppResult<VehicleRef> {
        let plate = self
            .license_plate
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        match (self.vehicle_id, plate) {
            (Some(id), None) => Ok(VehicleRef::Id(id)),
            (None, Some(plate)) => Ok(VehicleRef::LicensePlate(plate.to_string())),
            (Some(_), Some(_)) => Err(bad_request_error(
                "Send either vehicle_id or license_plate, not both",
            )),
            (None, None) => Err(bad_request_error(
                "A vehicle identifier (vehicle_id or license_plate) is required",
            )),
        }
    }

    /// Validar y convertir a columnas escribibles para el vehículo resuelto
    pub fn into_attributes(self, vehicle_id: i32) -> AppResult<ServiceOrderAttributes> {
        self.validate()?;
        Ok(ServiceOrderAttributes {
            vehicle_id,
            service_date: require_date(self.service_date, "service_date")?,
            order_number: normalize_optional(self.order_number),
            description: self.description.trim().to_string(),
            materials_used: normalize_optional(self.materials_used),
            cost: self.cost,
            is_operational: self.is_operational.unwrap_or(true),
            note: normalize_optional(self.note),
        })
    }
}

/// Request para actualizar una orden; el vehículo no se puede cambiar
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateServiceOrderRequest {
    pub service_date: Option<DateInput>,

    #[serde(default, deserialize_with = "present")]
    pub order_number: Option<Option<String>>,

    #[validate(custom = "validate_not_blank")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub materials_used: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    pub cost: Option<Option<Decimal>>,

    pub is_operational: Option<bool>,

    #[serde(default, deserialize_with = "present")]
    pub note: Option<Option<String>>,
}

impl UpdateServiceOrderRequest {
    pub fn is_empty(&self) -> bool {
        self.service_date.is_none()
            && self.order_number.is_none()
            && self.description.is_none()
            && self.materials_used.is_none()
            && self.cost.is_none()
            && self.is_operational.is_none()
            && self.note.is_none()
    }

    pub fn apply_to(self, attributes: &mut ServiceOrderAttributes) -> AppResult<()> {
        self.validate()?;
        if let Some(Some(value)) = &self.cost {
            validate_cost(value).map_err(|e| {
                let mut errors = validator::ValidationErrors::new();
                errors.add("cost", e);
                errors
            })?;
        }

        if let Some(date) = self.service_date {
            attributes.service_date = require_date(date, "service_date")?;
        }
        if let Some(order_number) = self.order_number {
            attributes.order_number = normalize_optional(order_number);
        }
        if let Some(description) = self.description {
            attributes.description = description.trim().to_string();
        }
        if let Some(materials_used) = self.materials_used {
            attributes.materials_used = normalize_optional(materials_used);
        }
        if let Some(cost) = self.cost {
            attributes.cost = cost;
        }
        if let Some(is_operational) = self.is_operational {
            attributes.is_operational = is_operational;
        }
        if let Some(note) = self.note {
            attributes.note = normalize_optional(note);
        }
        Ok(())
    }
}
