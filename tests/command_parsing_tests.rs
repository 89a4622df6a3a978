use duty_roster_bot::bot::commands::{help_text, Command};
use teloxide::utils::command::BotCommands;

#[test]
fn test_simple_commands_parse() {
    assert!(matches!(
        Command::parse("/start", "testbot").unwrap(),
        Command::Start
    ));
    assert!(matches!(
        Command::parse("/help", "testbot").unwrap(),
        Command::Help
    ));
    assert!(matches!(
        Command::parse("/duty", "testbot").unwrap(),
        Command::Duty
    ));
    assert!(matches!(
        Command::parse("/myduties", "testbot").unwrap(),
        Command::MyDuties
    ));
    assert!(matches!(
        Command::parse("/employees", "testbot").unwrap(),
        Command::Employees
    ));
}

#[test]
fn test_commands_parse_with_bot_mention() {
    assert!(matches!(
        Command::parse("/duty@testbot", "testbot").unwrap(),
        Command::Duty
    ));
}

#[test]
fn test_addemployee_captures_handle() {
    match Command::parse("/addemployee @alice", "testbot").unwrap() {
        Command::AddEmployee { handle } => assert_eq!(handle, "@alice"),
        other => panic!("Expected AddEmployee, got {other:?}"),
    }
}

#[test]
fn test_setduty_captures_date_and_handle() {
    match Command::parse("/setduty 2026-03-01 @alice", "testbot").unwrap() {
        Command::SetDuty { date, handle } => {
            assert_eq!(date, "2026-03-01");
            assert_eq!(handle, "@alice");
        }
        other => panic!("Expected SetDuty, got {other:?}"),
    }
}

#[test]
fn test_setduty_with_wrong_arity_fails() {
    assert!(Command::parse("/setduty 2026-03-01", "testbot").is_err());
    assert!(Command::parse("/setduty 2026-03-01 @alice extra", "testbot").is_err());
}

#[test]
fn test_removeduty_captures_date() {
    match Command::parse("/removeduty 2026-03-01", "testbot").unwrap() {
        Command::RemoveDuty { date } => assert_eq!(date, "2026-03-01"),
        other => panic!("Expected RemoveDuty, got {other:?}"),
    }
}

#[test]
fn test_unknown_command_fails_to_parse() {
    assert!(Command::parse("/frobnicate", "testbot").is_err());
    assert!(Command::parse("not a command", "testbot").is_err());
}

#[test]
fn test_admin_only_classification() {
    assert!(!Command::Start.is_admin_only());
    assert!(!Command::Help.is_admin_only());
    assert!(!Command::Duty.is_admin_only());
    assert!(!Command::MyDuties.is_admin_only());
    assert!(Command::Employees.is_admin_only());
    assert!(Command::AddEmployee {
        handle: "@a".to_string()
    }
    .is_admin_only());
    assert!(Command::SetDuty {
        date: "2026-03-01".to_string(),
        handle: "@a".to_string()
    }
    .is_admin_only());
    assert!(Command::RemoveDuty {
        date: "2026-03-01".to_string()
    }
    .is_admin_only());
}

#[test]
fn test_help_text_hides_admin_section_from_non_admins() {
    let text = help_text(false);
    assert!(text.contains("/duty"));
    assert!(text.contains("/myduties"));
    assert!(!text.contains("/setduty"));
    assert!(!text.contains("/addemployee"));
    assert!(!text.contains("/removeduty"));
    assert!(!text.contains("/employees"));
}

#[test]
fn test_help_text_shows_admin_section_to_admins() {
    let text = help_text(true);
    assert!(text.contains("/duty"));
    assert!(text.contains("/employees"));
    assert!(text.contains("/addemployee"));
    assert!(text.contains("/setduty YYYY-MM-DD @handle"));
    assert!(text.contains("/removeduty YYYY-MM-DD"));
}
