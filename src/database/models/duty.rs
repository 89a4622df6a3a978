use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::models::Employee;
use crate::error::BotError;

/// A single calendar date's on-call assignment. The `date` column carries a
/// unique index, so at most one row exists per date.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Duty {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub notified: bool,
    pub created_at: DateTime<Utc>,
}

impl Duty {
    pub async fn find_by_date(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Duty>(
            "SELECT id, employee_id, date, notified, created_at FROM duties WHERE date = ?",
        )
        .bind(date)
        .fetch_optional(pool)
        .await
    }

    /// The employee assigned for a date, if any.
    pub async fn assignee(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
    ) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(
            "SELECT e.id, e.telegram_id, e.username, e.full_name, e.is_admin, e.is_active, e.created_at
             FROM employees e
             JOIN duties d ON d.employee_id = e.id
             WHERE d.date = ?",
        )
        .bind(date)
        .fetch_optional(pool)
        .await
    }

    /// Upserts the assignment for a date. An existing row is updated in place
    /// (and its `notified` flag reset, since the new assignee has not been
    /// reminded); a fresh date takes the plain-insert path, so two racing
    /// assignments hit the unique index and the loser gets a conflict error
    /// instead of silently overwriting the winner.
    ///
    /// Returns the stored duty and whether an earlier assignment was replaced.
    pub async fn assign(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
        employee_id: i64,
    ) -> Result<(Self, bool), BotError> {
        let mut tx = pool.begin().await?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM duties WHERE date = ?")
            .bind(date)
            .fetch_optional(&mut tx)
            .await?;

        let reassigned = existing.is_some();
        match existing {
            Some(id) => {
                sqlx::query("UPDATE duties SET employee_id = ?, notified = 0 WHERE id = ?")
                    .bind(employee_id)
                    .bind(id)
                    .execute(&mut tx)
                    .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO duties (employee_id, date, notified, created_at)
                     VALUES (?, ?, 0, ?)",
                )
                .bind(employee_id)
                .bind(date)
                .bind(Utc::now())
                .execute(&mut tx)
                .await
                .map_err(|e| map_unique_violation(e, date))?;
            }
        }

        tx.commit().await.map_err(|e| map_unique_violation(e, date))?;

        let duty = Self::find_by_date(pool, date)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok((duty, reassigned))
    }

    /// Deletes the assignment for a date. Returns false when there was
    /// nothing to remove.
    pub async fn remove(pool: &sqlx::SqlitePool, date: NaiveDate) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM duties WHERE date = ?")
            .bind(date)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Duties of one employee from `from` onwards, ascending by date.
    pub async fn upcoming_for_employee(
        pool: &sqlx::SqlitePool,
        employee_id: i64,
        from: NaiveDate,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Duty>(
            "SELECT id, employee_id, date, notified, created_at
             FROM duties WHERE employee_id = ? AND date >= ? ORDER BY date",
        )
        .bind(employee_id)
        .bind(from)
        .fetch_all(pool)
        .await
    }

    /// The duty row the reminder job still owes a notification for.
    pub async fn due_unnotified(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Duty>(
            "SELECT id, employee_id, date, notified, created_at
             FROM duties WHERE date = ? AND notified = 0",
        )
        .bind(date)
        .fetch_optional(pool)
        .await
    }

    /// Records a confirmed delivery. Only called after the send succeeded.
    pub async fn mark_notified(pool: &sqlx::SqlitePool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE duties SET notified = 1 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

/// Translates a unique-index violation on `duties.date` into the conflict
/// error handed to the loser of a concurrent assignment race.
pub fn map_unique_violation(err: sqlx::Error, date: NaiveDate) -> BotError {
    match &err {
        sqlx::Error::Database(db) if db.message().contains("UNIQUE constraint failed") => {
            BotError::Conflict(date)
        }
        _ => BotError::Database(err),
    }
}
