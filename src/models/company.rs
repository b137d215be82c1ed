//! Modelo de Company
//!
//! Este módulo contiene el struct Company (empresa propietaria de vehículos)
//! y sus variantes para CRUD operations. Mapea a la tabla `companies`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::errors::AppResult;
use crate::utils::validation::{normalize_optional, present, validate_not_blank};

/// Columnas escribibles de la tabla companies
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CompanyAttributes {
    pub name: String,
    pub contact: Option<String>,
}

/// Company principal - mapea exactamente a la tabla companies
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Company {
    pub id: i32,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attributes: CompanyAttributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una nueva company
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: String,

    pub contact: Option<String>,
}

impl CreateCompanyRequest {
    pub fn into_attributes(self) -> AppResult<CompanyAttributes> {
        self.validate()?;
        Ok(CompanyAttributes {
            name: self.name.trim().to_string(),
            contact: normalize_optional(self.contact),
        })
    }
}

/// Request para actualizar una company existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub contact: Option<Option<String>>,
}

impl UpdateCompanyRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.contact.is_none()
    }

    pub fn apply_to(self, attributes: &mut CompanyAttributes) -> AppResult<()> {
        self.validate()?;
        if let Some(name) = self.name {
            attributes.name = name.trim().to_string();
        }
        if let Some(contact) = self.contact {
            attributes.contact = normalize_optional(contact);
        }
        Ok(())
    }
}
