use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::location::{Location, LocationAttributes};
use crate::repositories::LocationRepository;
use crate::utils::errors::{map_db_error, AppResult};

pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn duplicate_name(name: &str) -> String {
    format!("Location with name '{}' already exists", name)
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn list(&self) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(locations)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    async fn create(&self, attributes: &LocationAttributes) -> AppResult<Location> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name, address)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&attributes.name)
        .bind(&attributes.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, &duplicate_name(&attributes.name)))?;

        Ok(location)
    }

    async fn update(&self, id: i32, attributes: &LocationAttributes) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET name = $2, address = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&attributes.name)
        .bind(&attributes.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, &duplicate_name(&attributes.name)))?;

        Ok(location)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Location is still referenced"))?;

        Ok(result.rows_affected() > 0)
    }
}
