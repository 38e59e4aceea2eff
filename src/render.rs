//! Text rendering for the command-line front end. Formatting only; all
//! numbers come from the core untouched.

use time::macros::format_description;

use crate::calc::CalculationRecord;

const UNDEFINED: &str = "n/a";

/// Indonesian Rupiah with no fraction digits, e.g. `Rp 1.500.000`.
pub fn format_rupiah(amount: f64) -> String {
    if !amount.is_finite() {
        return UNDEFINED.to_string();
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

pub fn format_months(months: Option<f64>) -> String {
    match months {
        Some(m) => format!("{m:.1} months"),
        None => UNDEFINED.to_string(),
    }
}

pub fn format_percent(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{p:.2}%"),
        None => UNDEFINED.to_string(),
    }
}

fn format_timestamp(record: &CalculationRecord) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]");
    record
        .timestamp
        .format(&fmt)
        .unwrap_or_else(|_| record.timestamp.to_string())
}

/// Full result block shown after a calculation.
pub fn record_details(record: &CalculationRecord) -> Vec<String> {
    vec![
        format!("Business:        {}", record.business_name),
        format!("Total capital:   {}", format_rupiah(record.total_capital)),
        format!("Monthly profit:  {}", format_rupiah(record.monthly_profit)),
        format!("Break-even:      {}", format_months(record.break_even)),
        format!("ROI:             {}", format_percent(record.roi)),
    ]
}

/// One history line.
pub fn record_summary(record: &CalculationRecord) -> String {
    format!(
        "{}  {}  capital {}  profit/month {}  ROI {}",
        format_timestamp(record),
        record.business_name,
        format_rupiah(record.initial_capital),
        format_rupiah(record.monthly_profit),
        format_percent(record.roi),
    )
}
