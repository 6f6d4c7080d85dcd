//! Postgres-backed credential and revocation stores.

use async_trait::async_trait;
use forms::ProfileUpdate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use super::store::{NewUser, RevocationStore, Role, StoreError, UserRecord, UserStore};

const USER_COLUMNS: &str = "id, email, password_hash, name, role, phone, bio, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, StoreError> {
    let role: String = row.try_get("role")?;
    let role = role.parse::<Role>().map_err(|e| StoreError::Db(sqlx::Error::Decode(Box::new(e))))?;
    Ok(UserRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        role,
        phone: row.try_get("phone")?,
        bio: row.try_get("bio")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (email, password_hash, name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;
        user_from_row(&row)
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<UserRecord, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE users
             SET name = COALESCE($2::text, name),
                 phone = CASE WHEN $3::text IS NULL THEN phone ELSE NULLIF($3::text, '') END,
                 bio = CASE WHEN $4::text IS NULL THEN bio ELSE NULLIF($4::text, '') END
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.bio.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;
        user_from_row(&row)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(user_from_row).collect()
    }
}

#[async_trait]
impl RevocationStore for PgStore {
    async fn revoke(&self, token_id: &str, expires_at: OffsetDateTime) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO revoked_sessions (token_id, expires_at) VALUES ($1, $2)
             ON CONFLICT (token_id) DO NOTHING",
        )
        .bind(token_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, StoreError> {
        let revoked: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM revoked_sessions WHERE token_id = $1)")
            .bind(token_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(revoked)
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM revoked_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(all(test, feature = "live-db-tests"))]
#[path = "pg_store_test.rs"]
mod tests;
