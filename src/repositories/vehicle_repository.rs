use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::{PgPool, Postgres};

use crate::models::vehicle::{Vehicle, VehicleAttributes, VehicleFilters};
use crate::repositories::VehicleRepository;
use crate::utils::errors::{map_db_error, AppResult};

// Vehículo con los nombres de empresa y ubicación ya resueltos
const SELECT_VEHICLE: &str = r#"
    SELECT v.*, c.name AS company_name, l.name AS location_name
    FROM vehicles v
    LEFT JOIN companies c ON c.id = v.company_id
    LEFT JOIN locations l ON l.id = v.location_id
"#;

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn duplicate_plate(license_plate: &str) -> String {
    format!("Vehicle with license_plate '{}' already exists", license_plate)
}

/// Enlazar las columnas escribibles en el orden de INSERT/UPDATE ($n..)
fn bind_attributes<'q>(
    query: QueryScalar<'q, Postgres, i32, PgArguments>,
    attributes: &'q VehicleAttributes,
) -> QueryScalar<'q, Postgres, i32, PgArguments> {
    query
        .bind(attributes.serial_number)
        .bind(attributes.status)
        .bind(&attributes.name)
        .bind(attributes.company_id)
        .bind(&attributes.license_plate)
        .bind(&attributes.trailer_license_plate)
        .bind(attributes.location_id)
        .bind(&attributes.vessel_plate_no)
        .bind(attributes.filter_install_date)
        .bind(attributes.filter_validity_months)
        .bind(attributes.annual_inspection_date)
        .bind(attributes.filter_manual_expiry_date)
        .bind(&attributes.sensor_technology)
        .bind(attributes.sensor_service_date)
        .bind(attributes.hose_hd63_replacement_date)
        .bind(attributes.hose_hd38_replacement_date)
        .bind(attributes.hose_tw75_replacement_date)
        .bind(attributes.hose_leak_test_date)
        .bind(attributes.volumetric_calibration_date)
        .bind(attributes.manometer_calibration_date)
        .bind(attributes.hecpv_ilcpv_test_date)
        .bind(&attributes.filter_type_plate_no)
        .bind(&attributes.contact_info)
        .bind(&attributes.note)
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let sql = format!(
            r#"{SELECT_VEHICLE}
            WHERE ($1::INT IS NULL OR v.company_id = $1)
              AND ($2::INT IS NULL OR v.location_id = $2)
              AND ($3::vehicle_status IS NULL OR v.status = $3)
            ORDER BY v.name ASC, v.id ASC"#
        );

        let vehicles = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(filters.company_id)
            .bind(filters.location_id)
            .bind(filters.status)
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let sql = format!("{SELECT_VEHICLE} WHERE v.id = $1");
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        let sql = format!("{SELECT_VEHICLE} WHERE v.license_plate = $1");
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(license_plate)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn create(&self, attributes: &VehicleAttributes) -> AppResult<Vehicle> {
        let query = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO vehicles (
                serial_number, status, name, company_id, license_plate, trailer_license_plate,
                location_id, vessel_plate_no, filter_install_date, filter_validity_months,
                annual_inspection_date, filter_manual_expiry_date, sensor_technology,
                sensor_service_date, hose_hd63_replacement_date, hose_hd38_replacement_date,
                hose_tw75_replacement_date, hose_leak_test_date, volumetric_calibration_date,
                manometer_calibration_date, hecpv_ilcpv_test_date, filter_type_plate_no,
                contact_info, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING id
            "#,
        );

        let id = bind_attributes(query, attributes)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error(e, &duplicate_plate(&attributes.license_plate)))?;

        self.find_by_id(id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
            .map_err(Into::into)
    }

    async fn update(&self, id: i32, attributes: &VehicleAttributes) -> AppResult<Option<Vehicle>> {
        let query = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE vehicles
            SET serial_number = $1, status = $2, name = $3, company_id = $4,
                license_plate = $5, trailer_license_plate = $6, location_id = $7,
                vessel_plate_no = $8, filter_install_date = $9, filter_validity_months = $10,
                annual_inspection_date = $11, filter_manual_expiry_date = $12,
                sensor_technology = $13, sensor_service_date = $14,
                hose_hd63_replacement_date = $15, hose_hd38_replacement_date = $16,
                hose_tw75_replacement_date = $17, hose_leak_test_date = $18,
                volumetric_calibration_date = $19, manometer_calibration_date = $20,
                hecpv_ilcpv_test_date = $21, filter_type_plate_no = $22,
                contact_info = $23, note = $24, updated_at = NOW()
            WHERE id = $25
            RETURNING id
            "#,
        );

        let updated = bind_attributes(query, attributes)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, &duplicate_plate(&attributes.license_plate)))?;

        match updated {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Vehicle is still referenced"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_company(&self, company_id: i32) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles WHERE company_id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_by_location(&self, location_id: i32) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles WHERE location_id = $1")
            .bind(location_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
