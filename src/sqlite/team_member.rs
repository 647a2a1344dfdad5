//! `SQLite` implementation of [`TeamMemberRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    AccessError, CreateTeamMember, PermissionSet, TeamMember, TeamMemberRepository,
    UpdateTeamMember,
};

const COLUMNS: &str = "id, principal_id, email, name, role, permissions, department, position, status, created_at, updated_at";

/// `SQLite`-backed team-member store. Permissions are kept as a JSON array
/// of identifiers in a text column.
#[derive(Clone)]
pub struct SqliteTeamMemberRepository {
    pool: SqlitePool,
}

impl SqliteTeamMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TeamMemberRecord {
    id: i64,
    principal_id: Option<String>,
    email: String,
    name: String,
    role: String,
    permissions: String,
    department: Option<String>,
    position: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TeamMemberRecord> for TeamMember {
    type Error = AccessError;

    fn try_from(row: TeamMemberRecord) -> Result<Self, Self::Error> {
        let permissions = PermissionSet::from_json(&row.permissions).map_err(|e| {
            log::error!(target: "dashgate", "msg=\"invalid permission format\", member_id={}, error=\"{e}\"", row.id);
            e
        })?;

        Ok(TeamMember {
            id: u64::try_from(row.id)
                .map_err(|_| AccessError::Internal(format!("negative member id {}", row.id)))?,
            principal_id: row.principal_id,
            email: row.email,
            name: row.name,
            role: row.role.parse()?,
            permissions,
            department: row.department,
            position: row.position,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AccessError {
    move |e| {
        if let Some(db) = e.as_database_error().filter(|db| db.is_unique_violation()) {
            log::info!(target: "dashgate", "msg=\"team member conflict\", operation=\"{operation}\", constraint=\"{}\"", db.message());
            return AccessError::AlreadyExists;
        }
        log::error!(target: "dashgate", "msg=\"database error\", operation=\"{operation}\", error=\"{e}\"");
        AccessError::DatabaseError(e.to_string())
    }
}

fn row_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

fn into_member(row: Option<TeamMemberRecord>) -> Result<Option<TeamMember>, AccessError> {
    row.map(TeamMember::try_from).transpose()
}

#[async_trait]
impl TeamMemberRepository for SqliteTeamMemberRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_by_id(&self, id: u64) -> Result<Option<TeamMember>, AccessError> {
        let Some(id) = row_id(id) else {
            return Ok(None);
        };

        let row: Option<TeamMemberRecord> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM team_members WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error("find_team_member_by_id"))?;

        into_member(row)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_by_principal_id(
        &self,
        principal_id: &str,
    ) -> Result<Option<TeamMember>, AccessError> {
        let row: Option<TeamMemberRecord> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM team_members WHERE principal_id = ?"
        ))
        .bind(principal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("find_team_member_by_principal_id"))?;

        into_member(row)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, email), err))]
    async fn find_by_email(&self, email: &str) -> Result<Option<TeamMember>, AccessError> {
        // the email column is COLLATE NOCASE
        let row: Option<TeamMemberRecord> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM team_members WHERE email = ?"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error("find_team_member_by_email"))?;

        into_member(row)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list(&self) -> Result<Vec<TeamMember>, AccessError> {
        let rows: Vec<TeamMemberRecord> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM team_members ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(database_error("list_team_members"))?;

        rows.into_iter().map(TeamMember::try_from).collect()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, data), err))]
    async fn create(&self, data: CreateTeamMember) -> Result<TeamMember, AccessError> {
        let now = Utc::now();
        let row: TeamMemberRecord = sqlx::query_as(&format!(
            r"
            INSERT INTO team_members
                (principal_id, email, name, role, permissions, department, position, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "
        ))
        .bind(&data.principal_id)
        .bind(&data.email)
        .bind(&data.name)
        .bind(data.role.to_string())
        .bind(data.permissions.to_json())
        .bind(&data.department)
        .bind(&data.position)
        .bind(data.status.to_string())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("create_team_member"))?;

        row.try_into()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, data), err))]
    async fn update(&self, id: u64, data: UpdateTeamMember) -> Result<TeamMember, AccessError> {
        let id = row_id(id).ok_or(AccessError::NotFound)?;

        let row: Option<TeamMemberRecord> = sqlx::query_as(&format!(
            r"
            UPDATE team_members SET
                principal_id = COALESCE(?, principal_id),
                name = COALESCE(?, name),
                role = COALESCE(?, role),
                permissions = COALESCE(?, permissions),
                department = COALESCE(?, department),
                position = COALESCE(?, position),
                status = COALESCE(?, status),
                updated_at = ?
            WHERE id = ?
            RETURNING {COLUMNS}
            "
        ))
        .bind(&data.principal_id)
        .bind(&data.name)
        .bind(data.role.map(|role| role.to_string()))
        .bind(data.permissions.as_ref().map(PermissionSet::to_json))
        .bind(&data.department)
        .bind(&data.position)
        .bind(data.status.map(|status| status.to_string()))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("update_team_member"))?;

        into_member(row)?.ok_or(AccessError::NotFound)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete(&self, id: u64) -> Result<(), AccessError> {
        let id = row_id(id).ok_or(AccessError::NotFound)?;

        let result = sqlx::query("DELETE FROM team_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error("delete_team_member"))?;

        if result.rows_affected() == 0 {
            return Err(AccessError::NotFound);
        }

        Ok(())
    }
}
