use serde::{Deserialize, Serialize};

use crate::domain::club::Club;
use crate::domain::foundation::{ClubId, SportId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRequest {
    pub name: String,
    pub sport_id: SportId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubResponse {
    pub id: ClubId,
    pub name: String,
    pub sport_id: SportId,
    pub sport_name: String,
}

impl From<Club> for ClubResponse {
    fn from(club: Club) -> Self {
        Self {
            id: club.id,
            name: club.name,
            sport_id: club.sport_id,
            sport_name: club.sport_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClubListResponse {
    pub clubs: Vec<ClubResponse>,
}

#[derive(Debug, Serialize)]
pub struct SingleClubResponse {
    pub club: ClubResponse,
}

/// Catalog entry shown to any signed-in user browsing clubs to join.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: ClubId,
    pub name: String,
    pub sport_name: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub clubs: Vec<CatalogEntry>,
}
