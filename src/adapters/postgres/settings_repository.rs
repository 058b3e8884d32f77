//! PostgreSQL implementation of the settings repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::db_error;
use crate::domain::foundation::DomainError;
use crate::domain::settings::AppSettings;
use crate::ports::SettingsRepository;

pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    registration_fee: Option<Decimal>,
    monthly_fee: Option<Decimal>,
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn get(&self) -> Result<AppSettings, DomainError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT registration_fee, monthly_fee
            FROM app_settings
            WHERE singleton = true
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("load settings", e))?;

        Ok(row
            .map(|row| AppSettings {
                registration_fee: row.registration_fee,
                monthly_fee: row.monthly_fee,
            })
            .unwrap_or_default())
    }

    async fn update(
        &self,
        registration_fee: Decimal,
        monthly_fee: Decimal,
    ) -> Result<AppSettings, DomainError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO app_settings (singleton, registration_fee, monthly_fee)
            VALUES (true, $1, $2)
            ON CONFLICT (singleton)
            DO UPDATE SET registration_fee = excluded.registration_fee,
                          monthly_fee = excluded.monthly_fee
            RETURNING registration_fee, monthly_fee
            "#,
        )
        .bind(registration_fee)
        .bind(monthly_fee)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("update settings", e))?;

        Ok(AppSettings {
            registration_fee: row.registration_fee,
            monthly_fee: row.monthly_fee,
        })
    }
}
