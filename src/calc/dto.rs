use serde::Deserialize;

use crate::calc::engine::CalculationInput;
use crate::error::{AppError, AppResult};

/// Raw calculator form fields, exactly as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationForm {
    pub business_name: String,
    pub initial_capital: String,
    pub monthly_expenses: String,
    pub expected_revenue: String,
    pub profit_margin: String,
}

impl CalculationForm {
    /// Every numeric field must be present, finite and non-negative. The
    /// business name is free text.
    pub fn parse(&self) -> AppResult<CalculationInput> {
        Ok(CalculationInput {
            business_name: self.business_name.trim().to_string(),
            initial_capital: parse_amount("initialCapital", &self.initial_capital)?,
            monthly_expenses: parse_amount("monthlyExpenses", &self.monthly_expenses)?,
            expected_revenue: parse_amount("expectedRevenue", &self.expected_revenue)?,
            profit_margin: parse_amount("profitMargin", &self.profit_margin)?,
        })
    }
}

fn parse_amount(field: &str, raw: &str) -> AppResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation(field, "is required"));
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| AppError::validation(field, format!("`{raw}` is not a number")))?;
    if !value.is_finite() {
        return Err(AppError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(AppError::validation(field, "must not be negative"));
    }
    Ok(value)
}
