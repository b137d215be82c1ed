use serde::{Deserialize, Serialize};

use crate::models::vehicle::VehicleStatus;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            results: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            results: None,
            data: Some(data),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Listado con el número de elementos
    pub fn collection(data: Vec<T>) -> Self {
        Self {
            success: true,
            message: None,
            results: Some(data.len()),
            data: Some(data),
        }
    }
}

// Query del listado de vencimientos
#[derive(Debug, Default, Deserialize)]
pub struct DueMaintenanceQuery {
    pub within_days: Option<i64>,
    pub company_id: Option<i32>,
    pub location_id: Option<i32>,
    pub status: Option<VehicleStatus>,
}
