use axum::extract::{Path, State};
use axum::Json;

use super::super::{ApiError, AppState, RequireAccess};
use super::dto::{
    CatalogEntry, CatalogResponse, ClubListResponse, ClubRequest, ClubResponse,
    SingleClubResponse,
};
use crate::domain::foundation::ClubId;
use crate::ports::{ClubScope, ClubUpdate};

/// Superadmin sees every club; admins and coaches see the clubs they
/// staff; students have no club administration view at all.
pub async fn list_clubs(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
) -> Result<Json<ClubListResponse>, ApiError> {
    if !access.role.is_staff() {
        return Err(ApiError::forbidden());
    }
    let scope = if access.is_superadmin {
        ClubScope::All
    } else {
        ClubScope::StaffOf(access.user_id)
    };
    let clubs = state.clubs.list(scope).await?;
    Ok(Json(ClubListResponse {
        clubs: clubs.into_iter().map(ClubResponse::from).collect(),
    }))
}

pub async fn catalog(
    State(state): State<AppState>,
    RequireAccess(_access): RequireAccess,
) -> Result<Json<CatalogResponse>, ApiError> {
    let clubs = state.clubs.catalog().await?;
    Ok(Json(CatalogResponse {
        clubs: clubs
            .into_iter()
            .map(|club| CatalogEntry {
                id: club.id,
                name: club.name,
                sport_name: club.sport_name,
            })
            .collect(),
    }))
}

pub async fn create_club(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Json(body): Json<ClubRequest>,
) -> Result<Json<SingleClubResponse>, ApiError> {
    if !access.is_superadmin {
        return Err(ApiError::forbidden());
    }
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Club name and sport are required."));
    }
    let club = state
        .clubs
        .create(name, body.sport_id, access.user_id)
        .await?;
    Ok(Json(SingleClubResponse {
        club: ClubResponse::from(club),
    }))
}

pub async fn update_club(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<ClubId>,
    Json(body): Json<ClubRequest>,
) -> Result<Json<SingleClubResponse>, ApiError> {
    if !access.is_superadmin {
        return Err(ApiError::forbidden());
    }
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Club name and sport are required."));
    }
    let club = state
        .clubs
        .update(
            id,
            ClubUpdate {
                name: Some(name.to_string()),
                sport_id: Some(body.sport_id),
            },
        )
        .await?;
    Ok(Json(SingleClubResponse {
        club: ClubResponse::from(club),
    }))
}

pub async fn delete_club(
    State(state): State<AppState>,
    RequireAccess(access): RequireAccess,
    Path(id): Path<ClubId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !access.is_superadmin {
        return Err(ApiError::forbidden());
    }
    state.clubs.delete(id).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
