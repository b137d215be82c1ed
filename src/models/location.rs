//! Modelo de Location
//!
//! Ubicaciones (bases, depósitos) donde se estacionan los vehículos.
//! Mapea a la tabla `locations`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::errors::AppResult;
use crate::utils::validation::{normalize_optional, present, validate_not_blank};

/// Columnas escribibles de la tabla locations
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct LocationAttributes {
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub id: i32,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attributes: LocationAttributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una nueva ubicación
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: String,

    pub address: Option<String>,
}

impl CreateLocationRequest {
    pub fn into_attributes(self) -> AppResult<LocationAttributes> {
        self.validate()?;
        Ok(LocationAttributes {
            name: self.name.trim().to_string(),
            address: normalize_optional(self.address),
        })
    }
}

/// Request para actualizar una ubicación existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub address: Option<Option<String>>,
}

impl UpdateLocationRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }

    pub fn apply_to(self, attributes: &mut LocationAttributes) -> AppResult<()> {
        self.validate()?;
        if let Some(name) = self.name {
            attributes.name = name.trim().to_string();
        }
        if let Some(address) = self.address {
            attributes.address = normalize_optional(address);
        }
        Ok(())
    }
}
