//! Command-line front end: parses raw arguments, calls the core, and turns
//! results into printable lines and notices.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::auth::{self, LoginRequest, RegisterRequest};
use crate::calc::CalculationForm;
use crate::error::{AppResult, Notice};
use crate::history::{services as history, HistoryFilter};
use crate::render;
use crate::state::AppState;

/// Business profitability calculator.
#[derive(Parser, Debug, Clone)]
#[command(name = "profitcheck", version, about = "Business profitability calculator")]
pub struct Cli {
    /// Data directory (overrides PROFITCHECK_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a local account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in. Each command runs as a fresh start, so only a session saved
    /// with --remember is used by later commands; without it they keep using
    /// the shared history.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        remember: bool,
    },
    /// End the current session.
    Logout,
    /// Show who the next calculation will be saved for.
    Whoami,
    /// Run a calculation and save it to history.
    Calc {
        #[arg(long, default_value = "")]
        business_name: String,
        #[arg(long, allow_hyphen_values = true)]
        initial_capital: String,
        #[arg(long, allow_hyphen_values = true)]
        monthly_expenses: String,
        #[arg(long, allow_hyphen_values = true)]
        expected_revenue: String,
        /// Profit margin in percent.
        #[arg(long, allow_hyphen_values = true)]
        profit_margin: String,
    },
    /// List saved calculations.
    History {
        /// all, today, 7d or 30d
        #[arg(long, default_value = "all")]
        filter: HistoryFilter,
    },
    /// Show the most recent calculation.
    Last,
    /// Delete the saved calculations of the current identity.
    ClearHistory,
}

/// What a command produced: a status notice plus any detail lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub notice: Notice,
    pub lines: Vec<String>,
}

impl Outcome {
    fn info(message: impl Into<String>) -> Self {
        Self {
            notice: Notice::info(message),
            lines: Vec::new(),
        }
    }

    fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }
}

/// Runs one command against `st`. Core failures come back as `Err` for the
/// caller to show via `AppError::notice`.
pub fn execute(command: &Command, st: &AppState) -> AppResult<Outcome> {
    match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let req = RegisterRequest {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
            };
            req.validate()?;
            auth::register(st, &req)?;
            Ok(Outcome::info("Registration successful! Please log in."))
        }
        Command::Login {
            email,
            password,
            remember,
        } => {
            let ctx = auth::login(
                st,
                &LoginRequest {
                    email: email.clone(),
                    password: password.clone(),
                    remember: *remember,
                },
            )?;
            let lines = history::last_result(st, &ctx.history_key())?
                .map(|r| render::record_details(&r))
                .unwrap_or_default();
            let mut message = format!("Welcome, {}!", ctx.user.name);
            if !ctx.remember {
                message.push_str(
                    " The session is not remembered; later commands use the shared history \
                     until you log in with --remember.",
                );
            }
            Ok(Outcome::info(message).with_lines(lines))
        }
        Command::Logout => {
            match auth::resume_session(st)? {
                Some(ctx) => auth::logout(st, ctx)?,
                None => auth::forget_session(st)?,
            }
            Ok(Outcome::info("Logged out."))
        }
        Command::Whoami => {
            if let Some(ctx) = auth::resume_session(st)? {
                return Ok(Outcome::info(format!(
                    "Logged in as {} <{}>",
                    ctx.user.name, ctx.user.email
                )));
            }
            let message = match auth::current_user(st)? {
                Some(user) => format!(
                    "Session for {} was not remembered; log in again with --remember to keep it.",
                    user.email
                ),
                None => "Not logged in; calculations are saved to the shared history.".to_string(),
            };
            Ok(Outcome::info(message))
        }
        Command::Calc {
            business_name,
            initial_capital,
            monthly_expenses,
            expected_revenue,
            profit_margin,
        } => {
            let input = CalculationForm {
                business_name: business_name.clone(),
                initial_capital: initial_capital.clone(),
                monthly_expenses: monthly_expenses.clone(),
                expected_revenue: expected_revenue.clone(),
                profit_margin: profit_margin.clone(),
            }
            .parse()?;
            let ctx = auth::resume_session(st)?;
            let key = auth::history_key_for(ctx.as_ref());
            let record = history::record_calculation(st, &key, &input)?;
            Ok(Outcome::info("Calculation saved.").with_lines(render::record_details(&record)))
        }
        Command::History { filter } => {
            let ctx = auth::resume_session(st)?;
            let key = auth::history_key_for(ctx.as_ref());
            let records = history::list_history(st, &key, *filter)?;
            if records.is_empty() {
                return Ok(Outcome::info("No calculations yet."));
            }
            let lines = records.iter().map(render::record_summary).collect();
            Ok(Outcome::info(format!("{} calculation(s), filter: {filter}", records.len()))
                .with_lines(lines))
        }
        Command::Last => {
            let ctx = auth::resume_session(st)?;
            let key = auth::history_key_for(ctx.as_ref());
            match history::last_result(st, &key)? {
                Some(record) => {
                    Ok(Outcome::info("Last calculation:").with_lines(render::record_details(&record)))
                }
                None => Ok(Outcome::info("No calculations yet.")),
            }
        }
        Command::ClearHistory => {
            let ctx = auth::resume_session(st)?;
            history::clear_history(st, &auth::history_key_for(ctx.as_ref()))?;
            Ok(Outcome::info("History cleared."))
        }
    }
}
