use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A support team member known to the bot.
///
/// Rows are created in two ways: first-seen registration on `/start` (with
/// `is_active` false until an admin adds the person to the roster) and the
/// startup admin sync, which upserts rows for the configured admin ids.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub full_name: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        match &self.username {
            Some(username) => format!("{} (@{})", self.full_name, username),
            None => self.full_name.clone(),
        }
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, telegram_id, username, full_name, is_admin, is_active, created_at
             FROM employees WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_telegram_id(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, telegram_id, username, full_name, is_admin, is_active, created_at
             FROM employees WHERE telegram_id = ?",
        )
        .bind(telegram_id)
        .fetch_optional(pool)
        .await
    }

    /// Handles are matched case-insensitively, without the leading `@`.
    pub async fn find_by_username(
        pool: &sqlx::SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, telegram_id, username, full_name, is_admin, is_active, created_at
             FROM employees WHERE username = ? COLLATE NOCASE",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// First-seen registration. Creates an inactive row on first contact and
    /// refreshes the mutable Telegram profile fields on every later call;
    /// `is_admin`/`is_active` are never touched here.
    pub async fn register(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
        username: Option<&str>,
        full_name: &str,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO employees (telegram_id, username, full_name, is_admin, is_active, created_at)
             VALUES (?, ?, ?, 0, 0, ?)
             ON CONFLICT (telegram_id)
             DO UPDATE SET username = excluded.username, full_name = excluded.full_name",
        )
        .bind(telegram_id)
        .bind(username)
        .bind(full_name)
        .bind(now)
        .execute(pool)
        .await?;

        Self::find_by_telegram_id(pool, telegram_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Puts an employee on the active roster. Idempotent.
    pub async fn activate(pool: &sqlx::SqlitePool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE employees SET is_active = 1 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn list_active(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, telegram_id, username, full_name, is_admin, is_active, created_at
             FROM employees WHERE is_active = 1 ORDER BY full_name",
        )
        .fetch_all(pool)
        .await
    }

    /// Loads the configured allowlist into `is_admin` so that authorization
    /// checks have a single source of truth. Clears the flag on rows that
    /// dropped off the list and upserts rows for ids that have never talked
    /// to the bot (their name stays a numeric placeholder until `/start`).
    pub async fn sync_admins(
        pool: &sqlx::SqlitePool,
        admin_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        if admin_ids.is_empty() {
            sqlx::query("UPDATE employees SET is_admin = 0")
                .execute(&mut tx)
                .await?;
        } else {
            let placeholders = admin_ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
            let clear = format!(
                "UPDATE employees SET is_admin = 0 WHERE telegram_id NOT IN ({placeholders})"
            );
            let mut query = sqlx::query(&clear);
            for id in admin_ids {
                query = query.bind(id);
            }
            query.execute(&mut tx).await?;

            let now = Utc::now();
            for id in admin_ids {
                sqlx::query(
                    "INSERT INTO employees (telegram_id, username, full_name, is_admin, is_active, created_at)
                     VALUES (?, NULL, ?, 1, 1, ?)
                     ON CONFLICT (telegram_id) DO UPDATE SET is_admin = 1",
                )
                .bind(id)
                .bind(id.to_string())
                .bind(now)
                .execute(&mut tx)
                .await?;
            }
        }

        tx.commit().await
    }

    pub async fn is_admin(
        pool: &sqlx::SqlitePool,
        telegram_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE telegram_id = ? AND is_admin = 1",
        )
        .bind(telegram_id)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }

    /// Removes an employee together with their duty rows in one transaction.
    /// The FK cascade would also cover the duties; the explicit delete keeps
    /// the behavior independent of the connection's pragma state.
    pub async fn delete(pool: &sqlx::SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM duties WHERE employee_id = ?")
            .bind(id)
            .execute(&mut tx)
            .await?;
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&mut tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
