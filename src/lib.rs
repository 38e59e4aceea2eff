//! Local business profitability calculator with optional accounts and a
//! bounded per-user calculation history.

pub mod auth;
pub mod calc;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod render;
pub mod state;
pub mod storage;

pub use error::{AppError, AppResult, Notice, Severity};
pub use state::AppState;
