//! PostgreSQL implementation of the membership repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{db_error, parse_club_role, violates_constraint};
use crate::domain::access::{ClubAccess, ClubRole};
use crate::domain::foundation::{ClubId, DomainError, ErrorCode, MembershipId, UserId};
use crate::domain::membership::Membership;
use crate::ports::{ClubScope, MembershipRepository};

pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClubAccessRow {
    club_id: Uuid,
    club_name: String,
    sport_name: Option<String>,
    role: String,
}

impl TryFrom<ClubAccessRow> for ClubAccess {
    type Error = DomainError;

    fn try_from(row: ClubAccessRow) -> Result<Self, Self::Error> {
        Ok(ClubAccess {
            id: ClubId::from_uuid(row.club_id),
            name: row.club_name,
            sport: row.sport_name,
            role: parse_club_role(&row.role)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    club_id: Uuid,
    club_name: String,
    user_id: Uuid,
    user_email: String,
    user_full_name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            club_id: ClubId::from_uuid(row.club_id),
            club_name: row.club_name,
            user_id: UserId::from_uuid(row.user_id),
            user_email: row.user_email,
            user_full_name: row.user_full_name,
            role: parse_club_role(&row.role)?,
            created_at: row.created_at,
        })
    }
}

const MEMBERSHIP_SELECT: &str = r#"
    SELECT
        m.id,
        m.club_id,
        c.name AS club_name,
        m.user_id,
        p.email AS user_email,
        p.full_name AS user_full_name,
        m.role,
        m.created_at
    FROM club_memberships m
    JOIN clubs c ON c.id = m.club_id
    JOIN profiles p ON p.id = m.user_id
"#;

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn clubs_of(&self, user_id: UserId) -> Result<Vec<ClubAccess>, DomainError> {
        let rows = sqlx::query_as::<_, ClubAccessRow>(
            r#"
            SELECT
                c.id AS club_id,
                c.name AS club_name,
                s.name AS sport_name,
                m.role
            FROM club_memberships m
            JOIN clubs c ON c.id = m.club_id
            LEFT JOIN sports s ON s.id = c.sport_id
            WHERE m.user_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list user clubs", e))?;

        rows.into_iter().map(ClubAccess::try_from).collect()
    }

    async fn club_role_of(
        &self,
        user_id: UserId,
        club_id: ClubId,
    ) -> Result<Option<ClubRole>, DomainError> {
        let role: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT role
            FROM club_memberships
            WHERE user_id = $1 AND club_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(club_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("club role lookup", e))?;

        role.map(|(r,)| parse_club_role(&r)).transpose()
    }

    async fn list(&self, scope: ClubScope) -> Result<Vec<Membership>, DomainError> {
        let rows = match scope {
            ClubScope::All => {
                sqlx::query_as::<_, MembershipRow>(&format!(
                    "{MEMBERSHIP_SELECT} ORDER BY m.created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::AdminOf(user_id) => {
                sqlx::query_as::<_, MembershipRow>(&format!(
                    r#"{MEMBERSHIP_SELECT}
                    JOIN club_memberships admin
                      ON admin.club_id = m.club_id
                     AND admin.user_id = $1
                     AND admin.role = 'admin'
                    ORDER BY m.created_at DESC"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::StaffOf(user_id) => {
                sqlx::query_as::<_, MembershipRow>(&format!(
                    r#"{MEMBERSHIP_SELECT}
                    JOIN club_memberships staff
                      ON staff.club_id = m.club_id
                     AND staff.user_id = $1
                     AND staff.role IN ('admin', 'coach')
                    ORDER BY m.created_at DESC"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
            ClubScope::MemberOf(user_id) => {
                sqlx::query_as::<_, MembershipRow>(&format!(
                    r#"{MEMBERSHIP_SELECT}
                    JOIN club_memberships member
                      ON member.club_id = m.club_id
                     AND member.user_id = $1
                    ORDER BY m.created_at DESC"#
                ))
                .bind(user_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| db_error("list memberships", e))?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn find(&self, id: MembershipId) -> Result<Option<Membership>, DomainError> {
        let row = sqlx::query_as::<_, MembershipRow>(&format!(
            "{MEMBERSHIP_SELECT} WHERE m.id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find membership", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn create(
        &self,
        club_id: ClubId,
        user_id: UserId,
        role: ClubRole,
    ) -> Result<Membership, DomainError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO club_memberships (id, club_id, user_id, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(club_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates_constraint(&e, "club_memberships_club_id_user_id_key") {
                return DomainError::new(
                    ErrorCode::Conflict,
                    "User is already a member of this club.",
                );
            }
            if violates_constraint(&e, "club_memberships_club_id_fkey") {
                return DomainError::new(ErrorCode::ClubNotFound, "Club not found.");
            }
            if violates_constraint(&e, "club_memberships_user_id_fkey") {
                return DomainError::new(ErrorCode::UserNotFound, "User not found.");
            }
            db_error("create membership", e)
        })?;

        self.find(MembershipId::from_uuid(id)).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::DatabaseError, "created membership vanished")
        })
    }

    async fn update_role(
        &self,
        id: MembershipId,
        role: ClubRole,
    ) -> Result<Membership, DomainError> {
        let updated = sqlx::query(
            r#"
            UPDATE club_memberships
            SET role = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update membership role", e))?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found.",
            ));
        }

        self.find(id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::MembershipNotFound, "Membership not found.")
        })
    }

    async fn delete(&self, id: MembershipId) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM club_memberships WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete membership", e))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found.",
            ));
        }
        Ok(())
    }

    async fn ensure_student(&self, club_id: ClubId, user_id: UserId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO club_memberships (id, club_id, user_id, role)
            VALUES ($1, $2, $3, 'student')
            ON CONFLICT (club_id, user_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(club_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("ensure student membership", e))?;
        Ok(())
    }
}
