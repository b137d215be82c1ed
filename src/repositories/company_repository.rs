use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::company::{Company, CompanyAttributes};
use crate::repositories::CompanyRepository;
use crate::utils::errors::{map_db_error, AppResult};

pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn duplicate_name(name: &str) -> String {
    format!("Company with name '{}' already exists", name)
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn list(&self) -> AppResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(companies)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(company)
    }

    async fn create(&self, attributes: &CompanyAttributes) -> AppResult<Company> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, contact)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&attributes.name)
        .bind(&attributes.contact)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, &duplicate_name(&attributes.name)))?;

        Ok(company)
    }

    async fn update(&self, id: i32, attributes: &CompanyAttributes) -> AppResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, contact = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&attributes.name)
        .bind(&attributes.contact)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, &duplicate_name(&attributes.name)))?;

        Ok(company)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Company is still referenced"))?;

        Ok(result.rows_affected() > 0)
    }
}
