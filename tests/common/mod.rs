//! Utilidades compartidas por los tests de integración
//!
//! `InMemoryDb` implementa los cuatro repositorios sobre tablas en memoria,
//! con las mismas reglas de unicidad y joins que PostgreSQL.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;

use fleet_maintenance::config::EnvironmentConfig;
use fleet_maintenance::models::company::{Company, CompanyAttributes};
use fleet_maintenance::models::location::{Location, LocationAttributes};
use fleet_maintenance::models::service_order::{
    ServiceOrder, ServiceOrderAttributes, ServiceOrderFilters,
};
use fleet_maintenance::models::vehicle::{Vehicle, VehicleAttributes, VehicleFilters};
use fleet_maintenance::repositories::{
    CompanyRepository, LocationRepository, ServiceOrderRepository, VehicleRepository,
};
use fleet_maintenance::utils::clock::{FixedClock, SystemClock};
use fleet_maintenance::utils::errors::{AppError, AppResult};
use fleet_maintenance::{create_router, AppState};

/// Fecha "hoy" usada por todos los tests
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

#[derive(Default)]
struct Tables {
    next_id: i32,
    companies: Vec<Company>,
    locations: Vec<Location>,
    vehicles: Vec<Vehicle>,
    service_orders: Vec<ServiceOrder>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn company_name(&self, id: i32) -> Option<String> {
        self.companies
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.attributes.name.clone())
    }

    fn location_name(&self, id: i32) -> Option<String> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.attributes.name.clone())
    }

    /// Resolver los nombres unidos como haría el LEFT JOIN
    fn joined_vehicle(&self, vehicle: &Vehicle) -> Vehicle {
        let mut vehicle = vehicle.clone();
        vehicle.company_name = self.company_name(vehicle.attributes.company_id);
        vehicle.location_name = self.location_name(vehicle.attributes.location_id);
        vehicle
    }

    fn joined_order(&self, order: &ServiceOrder) -> ServiceOrder {
        let mut order = order.clone();
        let vehicle = self
            .vehicles
            .iter()
            .find(|v| v.id == order.attributes.vehicle_id)
            .map(|v| self.joined_vehicle(v));
        order.vehicle_name = vehicle.as_ref().map(|v| v.attributes.name.clone());
        order.license_plate = vehicle.as_ref().map(|v| v.attributes.license_plate.clone());
        order.company_name = vehicle.as_ref().and_then(|v| v.company_name.clone());
        order.location_name = vehicle.as_ref().and_then(|v| v.location_name.clone());
        order
    }

    fn plate_taken(&self, plate: &str, except: Option<i32>) -> bool {
        self.vehicles
            .iter()
            .any(|v| v.attributes.license_plate == plate && Some(v.id) != except)
    }
}

#[derive(Default)]
pub struct InMemoryDb {
    tables: RwLock<Tables>,
}

fn duplicate(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

#[async_trait]
impl CompanyRepository for InMemoryDb {
    async fn list(&self) -> AppResult<Vec<Company>> {
        let tables = self.tables.read().await;
        let mut companies = tables.companies.clone();
        companies.sort_by(|a, b| a.attributes.name.cmp(&b.attributes.name));
        Ok(companies)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Company>> {
        let tables = self.tables.read().await;
        Ok(tables.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, attributes: &CompanyAttributes) -> AppResult<Company> {
        let mut tables = self.tables.write().await;
        if tables.companies.iter().any(|c| c.attributes.name == attributes.name) {
            return Err(duplicate("Company", "name", &attributes.name));
        }
        let company = Company {
            id: tables.next_id(),
            attributes: attributes.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.companies.push(company.clone());
        Ok(company)
    }

    async fn update(&self, id: i32, attributes: &CompanyAttributes) -> AppResult<Option<Company>> {
        let mut tables = self.tables.write().await;
        if tables
            .companies
            .iter()
            .any(|c| c.attributes.name == attributes.name && c.id != id)
        {
            return Err(duplicate("Company", "name", &attributes.name));
        }
        Ok(tables.companies.iter_mut().find(|c| c.id == id).map(|c| {
            c.attributes = attributes.clone();
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.companies.len();
        tables.companies.retain(|c| c.id != id);
        Ok(tables.companies.len() < before)
    }
}

#[async_trait]
impl LocationRepository for InMemoryDb {
    async fn list(&self) -> AppResult<Vec<Location>> {
        let tables = self.tables.read().await;
        let mut locations = tables.locations.clone();
        locations.sort_by(|a, b| a.attributes.name.cmp(&b.attributes.name));
        Ok(locations)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Location>> {
        let tables = self.tables.read().await;
        Ok(tables.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, attributes: &LocationAttributes) -> AppResult<Location> {
        let mut tables = self.tables.write().await;
        if tables.locations.iter().any(|l| l.attributes.name == attributes.name) {
            return Err(duplicate("Location", "name", &attributes.name));
        }
        let location = Location {
            id: tables.next_id(),
            attributes: attributes.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.locations.push(location.clone());
        Ok(location)
    }

    async fn update(&self, id: i32, attributes: &LocationAttributes) -> AppResult<Option<Location>> {
        let mut tables = self.tables.write().await;
        if tables
            .locations
            .iter()
            .any(|l| l.attributes.name == attributes.name && l.id != id)
        {
            return Err(duplicate("Location", "name", &attributes.name));
        }
        Ok(tables.locations.iter_mut().find(|l| l.id == id).map(|l| {
            l.attributes = attributes.clone();
            l.updated_at = Utc::now();
            l.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.locations.len();
        tables.locations.retain(|l| l.id != id);
        Ok(tables.locations.len() < before)
    }
}

#[async_trait]
impl VehicleRepository for InMemoryDb {
    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        let mut vehicles: Vec<Vehicle> = tables
            .vehicles
            .iter()
            .filter(|v| filters.company_id.map_or(true, |id| v.attributes.company_id == id))
            .filter(|v| filters.location_id.map_or(true, |id| v.attributes.location_id == id))
            .filter(|v| filters.status.map_or(true, |s| v.attributes.status == s))
            .map(|v| tables.joined_vehicle(v))
            .collect();
        vehicles.sort_by(|a, b| {
            a.attributes
                .name
                .cmp(&b.attributes.name)
                .then(a.id.cmp(&b.id))
        });
        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .find(|v| v.id == id)
            .map(|v| tables.joined_vehicle(v)))
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .find(|v| v.attributes.license_plate == license_plate)
            .map(|v| tables.joined_vehicle(v)))
    }

    async fn create(&self, attributes: &VehicleAttributes) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if tables.plate_taken(&attributes.license_plate, None) {
            return Err(duplicate("Vehicle", "license_plate", &attributes.license_plate));
        }
        let vehicle = Vehicle {
            id: tables.next_id(),
            attributes: attributes.clone(),
            company_name: None,
            location_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.vehicles.push(vehicle.clone());
        Ok(tables.joined_vehicle(&vehicle))
    }

    async fn update(&self, id: i32, attributes: &VehicleAttributes) -> AppResult<Option<Vehicle>> {
        let mut tables = self.tables.write().await;
        if tables.plate_taken(&attributes.license_plate, Some(id)) {
            return Err(duplicate("Vehicle", "license_plate", &attributes.license_plate));
        }
        let updated = tables.vehicles.iter_mut().find(|v| v.id == id).map(|v| {
            v.attributes = attributes.clone();
            v.updated_at = Utc::now();
            v.clone()
        });
        Ok(updated.map(|v| tables.joined_vehicle(&v)))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.vehicles.len();
        tables.vehicles.retain(|v| v.id != id);
        Ok(tables.vehicles.len() < before)
    }

    async fn count_by_company(&self, company_id: i32) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .filter(|v| v.attributes.company_id == company_id)
            .count() as i64)
    }

    async fn count_by_location(&self, location_id: i32) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .filter(|v| v.attributes.location_id == location_id)
            .count() as i64)
    }
}

#[async_trait]
impl ServiceOrderRepository for InMemoryDb {
    async fn list(&self, filters: &ServiceOrderFilters) -> AppResult<Vec<ServiceOrder>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<ServiceOrder> = tables
            .service_orders
            .iter()
            .filter(|o| filters.vehicle_id.map_or(true, |id| o.attributes.vehicle_id == id))
            .map(|o| tables.joined_order(o))
            .collect();
        orders.sort_by(|a, b| {
            b.attributes
                .service_date
                .cmp(&a.attributes.service_date)
                .then(b.id.cmp(&a.id))
        });
        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceOrder>> {
        let tables = self.tables.read().await;
        Ok(tables
            .service_orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| tables.joined_order(o)))
    }

    async fn create(&self, attributes: &ServiceOrderAttributes) -> AppResult<ServiceOrder> {
        let mut tables = self.tables.write().await;
        let order = ServiceOrder {
            id: tables.next_id(),
            attributes: attributes.clone(),
            vehicle_name: None,
            license_plate: None,
            company_name: None,
            location_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        tables.service_orders.push(order.clone());
        Ok(tables.joined_order(&order))
    }

    async fn update(
        &self,
        id: i32,
        attributes: &ServiceOrderAttributes,
    ) -> AppResult<Option<ServiceOrder>> {
        let mut tables = self.tables.write().await;
        let updated = tables.service_orders.iter_mut().find(|o| o.id == id).map(|o| {
            o.attributes = attributes.clone();
            o.updated_at = Utc::now();
            o.clone()
        });
        Ok(updated.map(|o| tables.joined_order(&o)))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.service_orders.len();
        tables.service_orders.retain(|o| o.id != id);
        Ok(tables.service_orders.len() < before)
    }

    async fn count_by_vehicle(&self, vehicle_id: i32) -> AppResult<i64> {
        let tables = self.tables.read().await;
        Ok(tables
            .service_orders
            .iter()
            .filter(|o| o.attributes.vehicle_id == vehicle_id)
            .count() as i64)
    }
}

/// Aplicación completa sobre la base en memoria, con el reloj fijo en `today()`
pub fn create_test_app() -> Router {
    let db = Arc::new(InMemoryDb::default());
    let state = AppState {
        config: EnvironmentConfig::default(),
        companies: db.clone(),
        locations: db.clone(),
        vehicles: db.clone(),
        service_orders: db,
        clock: Arc::new(SystemClock),
    }
    .with_clock(Arc::new(FixedClock(today())));
    create_router(state)
}

/// Enviar una petición y devolver estado y cuerpo JSON (`Null` si vacío)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PATCH", uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "DELETE", uri, None).await
}

/// Crear empresa y ubicación y devolver sus ids
pub async fn seed_company_and_location(app: &Router) -> (i64, i64) {
    let (status, company) = post(app, "/api/companies", serde_json::json!({ "name": "Petrol d.d." })).await;
    assert_eq!(status, StatusCode::CREATED, "{company}");
    let (status, location) = post(app, "/api/locations", serde_json::json!({ "name": "Zagreb" })).await;
    assert_eq!(status, StatusCode::CREATED, "{location}");
    (
        company["data"]["id"].as_i64().unwrap(),
        location["data"]["id"].as_i64().unwrap(),
    )
}
