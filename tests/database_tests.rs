#![allow(clippy::unwrap_used)]

use anyhow::Result;
use chrono::NaiveDate;
use duty_roster_bot::database::connection::DatabaseManager;
use duty_roster_bot::database::models::{Duty, Employee};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db = DatabaseManager::new(&database_url).await?;
    db.run_migrations().await?;

    Ok((db, temp_dir))
}

#[tokio::test]
async fn test_register_creates_inactive_employee() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let employee = Employee::register(&db.pool, 1001, Some("alice"), "Alice Liddell").await?;

    assert_eq!(employee.telegram_id, 1001);
    assert_eq!(employee.username.as_deref(), Some("alice"));
    assert_eq!(employee.full_name, "Alice Liddell");
    assert!(!employee.is_admin);
    assert!(!employee.is_active);

    Ok(())
}

#[tokio::test]
async fn test_register_is_an_upsert_on_telegram_id() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let first = Employee::register(&db.pool, 1001, Some("alice"), "Alice").await?;
    Employee::activate(&db.pool, first.id).await?;

    // Same telegram id, new profile data: row is updated in place and the
    // roster status survives.
    let second = Employee::register(&db.pool, 1001, Some("alice_new"), "Alice L.").await?;

    assert_eq!(second.id, first.id);
    assert_eq!(second.username.as_deref(), Some("alice_new"));
    assert_eq!(second.full_name, "Alice L.");
    assert!(second.is_active);

    Ok(())
}

#[tokio::test]
async fn test_find_by_username_is_case_insensitive() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Employee::register(&db.pool, 1001, Some("Alice"), "Alice").await?;

    let found = Employee::find_by_username(&db.pool, "alice").await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().telegram_id, 1001);

    let missing = Employee::find_by_username(&db.pool, "bob").await?;
    assert!(missing.is_none());

    Ok(())
}

#[tokio::test]
async fn test_activation_and_active_listing() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let alice = Employee::register(&db.pool, 1, Some("alice"), "Alice").await?;
    let bob = Employee::register(&db.pool, 2, Some("bob"), "Bob").await?;
    Employee::register(&db.pool, 3, Some("carol"), "Carol").await?;

    Employee::activate(&db.pool, alice.id).await?;
    Employee::activate(&db.pool, bob.id).await?;

    let active = Employee::list_active(&db.pool).await?;
    let names: Vec<_> = active.iter().map(|e| e.full_name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    // Activating twice is a no-op.
    Employee::activate(&db.pool, alice.id).await?;
    assert_eq!(Employee::list_active(&db.pool).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_sync_admins_flags_known_rows() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Employee::register(&db.pool, 10, Some("alice"), "Alice").await?;
    Employee::register(&db.pool, 20, Some("bob"), "Bob").await?;

    Employee::sync_admins(&db.pool, &[10]).await?;

    assert!(Employee::is_admin(&db.pool, 10).await?);
    assert!(!Employee::is_admin(&db.pool, 20).await?);

    Ok(())
}

#[tokio::test]
async fn test_sync_admins_creates_placeholder_rows() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    // Id 99 never talked to the bot.
    Employee::sync_admins(&db.pool, &[99]).await?;

    let admin = Employee::find_by_telegram_id(&db.pool, 99).await?.unwrap();
    assert!(admin.is_admin);
    assert!(admin.is_active);
    assert_eq!(admin.full_name, "99");

    // First /start fills in the real profile and keeps the flag.
    Employee::register(&db.pool, 99, Some("root"), "Root Admin").await?;
    let admin = Employee::find_by_telegram_id(&db.pool, 99).await?.unwrap();
    assert!(admin.is_admin);
    assert_eq!(admin.full_name, "Root Admin");

    Ok(())
}

#[tokio::test]
async fn test_sync_admins_clears_removed_ids() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Employee::sync_admins(&db.pool, &[10, 20]).await?;
    assert!(Employee::is_admin(&db.pool, 10).await?);
    assert!(Employee::is_admin(&db.pool, 20).await?);

    Employee::sync_admins(&db.pool, &[20]).await?;
    assert!(!Employee::is_admin(&db.pool, 10).await?);
    assert!(Employee::is_admin(&db.pool, 20).await?);

    Employee::sync_admins(&db.pool, &[]).await?;
    assert!(!Employee::is_admin(&db.pool, 20).await?);

    Ok(())
}

#[tokio::test]
async fn test_is_admin_for_unknown_user() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    assert!(!Employee::is_admin(&db.pool, 424242).await?);

    Ok(())
}

#[tokio::test]
async fn test_deleting_employee_removes_their_duties() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let alice = Employee::register(&db.pool, 1, Some("alice"), "Alice").await?;
    Employee::activate(&db.pool, alice.id).await?;

    let first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let second = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    Duty::assign(&db.pool, first, alice.id).await?;
    Duty::assign(&db.pool, second, alice.id).await?;

    let deleted = Employee::delete(&db.pool, alice.id).await?;
    assert!(deleted);

    assert!(Duty::find_by_date(&db.pool, first).await?.is_none());
    assert!(Duty::find_by_date(&db.pool, second).await?.is_none());
    assert!(Duty::assignee(&db.pool, first).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_delete_missing_employee_reports_false() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    assert!(!Employee::delete(&db.pool, 12345).await?);

    Ok(())
}

#[tokio::test]
async fn test_display_name_formats() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let with_handle = Employee::register(&db.pool, 1, Some("alice"), "Alice").await?;
    assert_eq!(with_handle.display_name(), "Alice (@alice)");

    let without_handle = Employee::register(&db.pool, 2, None, "Bob").await?;
    assert_eq!(without_handle.display_name(), "Bob");

    Ok(())
}
