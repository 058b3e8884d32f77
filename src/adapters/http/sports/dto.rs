use serde::{Deserialize, Serialize};

use crate::domain::foundation::SportId;
use crate::ports::SportWithClubCount;

#[derive(Debug, Deserialize)]
pub struct SportRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SportResponse {
    pub id: SportId,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SportWithCountResponse {
    pub id: SportId,
    pub name: String,
    pub club_count: i64,
}

impl From<SportWithClubCount> for SportWithCountResponse {
    fn from(row: SportWithClubCount) -> Self {
        Self {
            id: row.sport.id,
            name: row.sport.name,
            club_count: row.club_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SportListResponse {
    pub sports: Vec<SportWithCountResponse>,
}

#[derive(Debug, Serialize)]
pub struct SingleSportResponse {
    pub sport: SportResponse,
}
