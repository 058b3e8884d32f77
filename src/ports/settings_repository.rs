//! Application settings port (singleton fee configuration).

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::foundation::DomainError;
use crate::domain::settings::AppSettings;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// The singleton settings row; defaults when none exists yet.
    async fn get(&self) -> Result<AppSettings, DomainError>;

    /// Upserts the singleton row with both fees.
    async fn update(
        &self,
        registration_fee: Decimal,
        monthly_fee: Decimal,
    ) -> Result<AppSettings, DomainError>;
}
