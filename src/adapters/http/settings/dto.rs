use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::settings::AppSettings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub registration_fee: Option<Decimal>,
    pub monthly_fee: Option<Decimal>,
}

impl From<AppSettings> for SettingsResponse {
    fn from(settings: AppSettings) -> Self {
        Self {
            registration_fee: settings.registration_fee,
            monthly_fee: settings.monthly_fee,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsEnvelope {
    pub settings: SettingsResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub registration_fee: Option<Decimal>,
    pub monthly_fee: Option<Decimal>,
}
