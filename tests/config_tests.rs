use duty_roster_bot::config::Config;
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment
// variable conflicts between parallel test threads.
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

const ALL_VARS: &[&str] = &[
    "BOT_TOKEN",
    "DATABASE_URL",
    "ADMIN_IDS",
    "REMINDER_HOUR",
    "REMINDER_MINUTE",
    "TZ",
    "LOG_LEVEL",
    "HTTP_PORT",
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

fn set_required() {
    env::set_var("BOT_TOKEN", "test_token_123");
    env::set_var("DATABASE_URL", "sqlite:test.db");
    env::set_var("ADMIN_IDS", "100,200");
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();
    set_required();
    env::set_var("REMINDER_HOUR", "8");
    env::set_var("REMINDER_MINUTE", "30");
    env::set_var("TZ", "Europe/Berlin");
    env::set_var("LOG_LEVEL", "DEBUG");
    env::set_var("HTTP_PORT", "8080");

    let config = Config::from_env().unwrap();

    assert_eq!(config.bot_token, "test_token_123");
    assert_eq!(config.database_url, "sqlite:test.db");
    assert_eq!(config.admin_ids, vec![100i64, 200]);
    assert_eq!(config.reminder_hour, 8);
    assert_eq!(config.reminder_minute, 30);
    assert_eq!(config.tz, chrono_tz::Europe::Berlin);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.http_port, 8080);

    clear_env();
}

#[test]
fn test_config_defaults_for_optional_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();
    set_required();

    let config = Config::from_env().unwrap();

    assert_eq!(config.reminder_hour, 9);
    assert_eq!(config.reminder_minute, 0);
    assert_eq!(config.tz, chrono_tz::Europe::Moscow);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.http_port, 3000);

    clear_env();
}

#[test]
fn test_config_missing_required_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();

    for missing in ["BOT_TOKEN", "DATABASE_URL", "ADMIN_IDS"] {
        clear_env();
        set_required();
        env::remove_var(missing);

        let result = Config::from_env();
        assert!(result.is_err(), "{missing} should be required");
        let message = result.unwrap_err().to_string();
        assert!(message.contains(missing), "error should name {missing}: {message}");
    }

    clear_env();
}

#[test]
fn test_config_empty_required_var_is_missing() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();
    set_required();
    env::set_var("BOT_TOKEN", "   ");

    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
fn test_config_malformed_admin_ids() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();
    set_required();
    env::set_var("ADMIN_IDS", "100,abc,300");

    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("ADMIN_IDS"));

    clear_env();
}

#[test]
fn test_config_admin_ids_with_spaces_and_gaps() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();
    set_required();
    env::set_var("ADMIN_IDS", " 1 , 2,,3, ");

    let config = Config::from_env().unwrap();
    assert_eq!(config.admin_ids, vec![1i64, 2, 3]);

    clear_env();
}

#[test]
fn test_config_reminder_time_bounds() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();
    set_required();

    env::set_var("REMINDER_HOUR", "24");
    assert!(Config::from_env().is_err());

    env::set_var("REMINDER_HOUR", "abc");
    assert!(Config::from_env().is_err());

    env::set_var("REMINDER_HOUR", "23");
    env::set_var("REMINDER_MINUTE", "60");
    assert!(Config::from_env().is_err());

    env::set_var("REMINDER_MINUTE", "59");
    let config = Config::from_env().unwrap();
    assert_eq!(config.reminder_hour, 23);
    assert_eq!(config.reminder_minute, 59);

    clear_env();
}

#[test]
fn test_config_unknown_timezone() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();
    set_required();
    env::set_var("TZ", "Not/AZone");

    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("TZ"));

    clear_env();
}

#[test]
fn test_config_invalid_port() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();
    set_required();
    env::set_var("HTTP_PORT", "not_a_port");

    let result = Config::from_env();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("HTTP_PORT"));

    clear_env();
}
