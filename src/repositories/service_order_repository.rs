use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::service_order::{ServiceOrder, ServiceOrderAttributes, ServiceOrderFilters};
use crate::repositories::ServiceOrderRepository;
use crate::utils::errors::{map_db_error, AppResult};

const SELECT_SERVICE_ORDER: &str = r#"
    SELECT so.*, v.name AS vehicle_name, v.license_plate AS license_plate,
           c.name AS company_name, l.name AS location_name
    FROM service_orders so
    LEFT JOIN vehicles v ON v.id = so.vehicle_id
    LEFT JOIN companies c ON c.id = v.company_id
    LEFT JOIN locations l ON l.id = v.location_id
"#;

pub struct PgServiceOrderRepository {
    pool: PgPool,
}

impl PgServiceOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceOrderRepository for PgServiceOrderRepository {
    async fn list(&self, filters: &ServiceOrderFilters) -> AppResult<Vec<ServiceOrder>> {
        let sql = format!(
            r#"{SELECT_SERVICE_ORDER}
            WHERE ($1::INT IS NULL OR so.vehicle_id = $1)
            ORDER BY so.service_date DESC, so.id DESC"#
        );

        let orders = sqlx::query_as::<_, ServiceOrder>(&sql)
            .bind(filters.vehicle_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<ServiceOrder>> {
        let sql = format!("{SELECT_SERVICE_ORDER} WHERE so.id = $1");
        let order = sqlx::query_as::<_, ServiceOrder>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    async fn create(&self, attributes: &ServiceOrderAttributes) -> AppResult<ServiceOrder> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO service_orders (
                vehicle_id, service_date, order_number, description,
                materials_used, cost, is_operational, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(attributes.vehicle_id)
        .bind(attributes.service_date)
        .bind(&attributes.order_number)
        .bind(&attributes.description)
        .bind(&attributes.materials_used)
        .bind(attributes.cost)
        .bind(attributes.is_operational)
        .bind(&attributes.note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Service order already exists"))?;

        self.find_by_id(id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
            .map_err(Into::into)
    }

    async fn update(
        &self,
        id: i32,
        attributes: &ServiceOrderAttributes,
    ) -> AppResult<Option<ServiceOrder>> {
        let updated = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE service_orders
            SET vehicle_id = $2, service_date = $3, order_number = $4, description = $5,
                materials_used = $6, cost = $7, is_operational = $8, note = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(attributes.vehicle_id)
        .bind(attributes.service_date)
        .bind(&attributes.order_number)
        .bind(&attributes.description)
        .bind(&attributes.materials_used)
        .bind(attributes.cost)
        .bind(attributes.is_operational)
        .bind(&attributes.note)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Service order already exists"))?;

        match updated {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM service_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_vehicle(&self, vehicle_id: i32) -> AppResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM service_orders WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
