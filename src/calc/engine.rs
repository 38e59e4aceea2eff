use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{AppError, AppResult, Metric};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Parsed calculator inputs. Amounts are in currency units; `profit_margin`
/// is a percentage (30 means 30%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub business_name: String,
    pub initial_capital: f64,
    pub monthly_expenses: f64,
    pub expected_revenue: f64,
    pub profit_margin: f64,
}

/// Inputs plus derived metrics. `break_even` and `roi` are `None` when their
/// divisor is zero; they serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub business_name: String,
    pub initial_capital: f64,
    pub monthly_expenses: f64,
    pub expected_revenue: f64,
    pub profit_margin: f64,
    pub total_capital: f64,
    pub monthly_profit: f64,
    pub break_even: Option<f64>,
    pub roi: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl CalculationRecord {
    /// Months until the initial capital is recovered.
    pub fn break_even_months(&self) -> AppResult<f64> {
        self.break_even
            .ok_or(AppError::DivisionUndefined(Metric::BreakEven))
    }

    /// Annualised return on the initial capital, in percent.
    pub fn roi_percent(&self) -> AppResult<f64> {
        self.roi.ok_or(AppError::DivisionUndefined(Metric::Roi))
    }
}

fn checked_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|v| v.is_finite())
}

/// Derives the profitability metrics. Pure; `now` becomes the record's
/// timestamp.
pub fn calculate(input: &CalculationInput, now: OffsetDateTime) -> CalculationRecord {
    let margin = input.profit_margin / 100.0;

    // one year of running costs on top of the initial capital
    let total_capital = input.initial_capital + input.monthly_expenses * MONTHS_PER_YEAR;
    let monthly_profit = input.expected_revenue * margin - input.monthly_expenses;
    let break_even = checked_div(
        input.initial_capital,
        input.expected_revenue - input.monthly_expenses,
    );
    let roi = checked_div(monthly_profit * MONTHS_PER_YEAR, input.initial_capital).map(|r| r * 100.0);

    CalculationRecord {
        business_name: input.business_name.clone(),
        initial_capital: input.initial_capital,
        monthly_expenses: input.monthly_expenses,
        expected_revenue: input.expected_revenue,
        profit_margin: input.profit_margin,
        total_capital,
        monthly_profit,
        break_even,
        roi,
        timestamp: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const EPS: f64 = 1e-9;

    fn input(capital: f64, expenses: f64, revenue: f64, margin: f64) -> CalculationInput {
        CalculationInput {
            business_name: "Warung Kopi".into(),
            initial_capital: capital,
            monthly_expenses: expenses,
            expected_revenue: revenue,
            profit_margin: margin,
        }
    }

    #[test]
    fn reference_scenario() {
        let now = datetime!(2024-06-01 10:00:00 +7);
        let r = calculate(&input(10_000_000.0, 2_000_000.0, 5_000_000.0, 30.0), now);

        assert!((r.total_capital - 34_000_000.0).abs() < EPS);
        assert!((r.monthly_profit - -500_000.0).abs() < EPS);
        assert!((r.break_even_months().unwrap() - 10.0 / 3.0).abs() < 1e-9);
        // -500k * 12 / 10M, as a percentage
        assert!((r.roi_percent().unwrap() - -60.0).abs() < EPS);
        assert_eq!(r.timestamp, now);
        assert_eq!(r.business_name, "Warung Kopi");
        assert_eq!(r.profit_margin, 30.0);
    }

    #[test]
    fn revenue_equal_to_expenses_leaves_break_even_undefined() {
        let r = calculate(
            &input(1_000_000.0, 500_000.0, 500_000.0, 20.0),
            datetime!(2024-06-01 0:00 UTC),
        );
        assert_eq!(r.break_even, None);
        assert!(matches!(
            r.break_even_months(),
            Err(AppError::DivisionUndefined(Metric::BreakEven))
        ));
        assert!(r.roi.is_some());
    }

    #[test]
    fn zero_capital_leaves_roi_undefined() {
        let r = calculate(&input(0.0, 100.0, 300.0, 50.0), datetime!(2024-06-01 0:00 UTC));
        assert_eq!(r.roi, None);
        assert!(matches!(
            r.roi_percent(),
            Err(AppError::DivisionUndefined(Metric::Roi))
        ));
        assert_eq!(r.break_even, Some(0.0));
    }

    #[test]
    fn all_zero_inputs_do_not_panic() {
        let r = calculate(&input(0.0, 0.0, 0.0, 0.0), datetime!(2024-06-01 0:00 UTC));
        assert_eq!(r.total_capital, 0.0);
        assert_eq!(r.break_even, None);
        assert_eq!(r.roi, None);
    }

    #[test]
    fn revenue_below_expenses_gives_negative_break_even() {
        let r = calculate(&input(1_200.0, 500.0, 200.0, 10.0), datetime!(2024-06-01 0:00 UTC));
        assert!((r.break_even.unwrap() - -4.0).abs() < EPS);
    }

    #[test]
    fn undefined_metrics_serialize_as_null() {
        let r = calculate(&input(0.0, 100.0, 100.0, 10.0), datetime!(2024-06-01 12:00 UTC));
        let json = serde_json::to_value(&r).unwrap();
        assert!(json["breakEven"].is_null());
        assert!(json["roi"].is_null());
        assert_eq!(json["timestamp"], "2024-06-01T12:00:00Z");

        let back: CalculationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }
}
