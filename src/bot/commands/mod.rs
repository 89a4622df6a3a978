pub mod assignment;
pub mod duty;
pub mod roster;

use teloxide::utils::command::BotCommands;

/// The command grammar. Unrecognized or malformed input fails to parse and
/// falls through to the fallback message handler.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Duty roster commands:")]
pub enum Command {
    #[command(description = "start working with the bot")]
    Start,
    #[command(description = "show available commands")]
    Help,
    #[command(description = "show who is on duty today")]
    Duty,
    #[command(description = "list your upcoming duties")]
    MyDuties,
    #[command(description = "list active employees (admin)")]
    Employees,
    #[command(description = "add an employee: /addemployee @handle (admin)")]
    AddEmployee { handle: String },
    #[command(
        description = "assign duty: /setduty YYYY-MM-DD @handle (admin)",
        parse_with = "split"
    )]
    SetDuty { date: String, handle: String },
    #[command(description = "clear duty: /removeduty YYYY-MM-DD (admin)")]
    RemoveDuty { date: String },
}

impl Command {
    /// The verb as typed, for log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::Help => "/help",
            Command::Duty => "/duty",
            Command::MyDuties => "/myduties",
            Command::Employees => "/employees",
            Command::AddEmployee { .. } => "/addemployee",
            Command::SetDuty { .. } => "/setduty",
            Command::RemoveDuty { .. } => "/removeduty",
        }
    }

    /// Commands that mutate or inspect the roster beyond the caller's own
    /// assignments.
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Command::Employees
                | Command::AddEmployee { .. }
                | Command::SetDuty { .. }
                | Command::RemoveDuty { .. }
        )
    }
}

/// `/help` output. A pure function of the caller's admin status.
pub fn help_text(is_admin: bool) -> String {
    let mut text = String::from(
        "<b>Available commands:</b>\n\n\
         /start — start working with the bot\n\
         /help — show this message\n\
         /duty — who is on duty today\n\
         /myduties — your upcoming duties\n",
    );

    if is_admin {
        text.push_str(
            "\n<b>Administration:</b>\n\
             /employees — list active employees\n\
             /addemployee @handle — add an employee to the roster\n\
             /setduty YYYY-MM-DD @handle — assign duty for a date\n\
             /removeduty YYYY-MM-DD — clear duty for a date\n",
        );
    } else {
        text.push_str("\nContact an administrator to change the roster.\n");
    }

    text
}
