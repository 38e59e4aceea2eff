use tracing::instrument;

use super::{HistoryFilter, HistoryKey, HistoryRepo};
use crate::calc::{calculate, CalculationInput, CalculationRecord};
use crate::error::AppResult;
use crate::state::AppState;

fn repo(st: &AppState) -> HistoryRepo<'_> {
    HistoryRepo::new(st.store.as_ref(), st.config.history_limit)
}

/// Computes the metrics and stores the result under `key`.
#[instrument(skip(st, input), fields(business = %input.business_name))]
pub fn record_calculation(
    st: &AppState,
    key: &HistoryKey,
    input: &CalculationInput,
) -> AppResult<CalculationRecord> {
    let record = calculate(input, st.clock.now());
    repo(st).append(key, record.clone())?;
    Ok(record)
}

pub fn list_history(
    st: &AppState,
    key: &HistoryKey,
    filter: HistoryFilter,
) -> AppResult<Vec<CalculationRecord>> {
    Ok(repo(st).list(key, filter, st.clock.now())?)
}

pub fn last_result(st: &AppState, key: &HistoryKey) -> AppResult<Option<CalculationRecord>> {
    Ok(repo(st).latest(key)?)
}

pub fn clear_history(st: &AppState, key: &HistoryKey) -> AppResult<()> {
    Ok(repo(st).clear(key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use std::sync::Arc;
    use time::macros::datetime;

    fn state_at(now: time::OffsetDateTime) -> AppState {
        let st = AppState::fake();
        AppState::from_parts(st.config, st.store, Arc::new(FixedClock(now)))
    }

    fn input(name: &str) -> CalculationInput {
        CalculationInput {
            business_name: name.into(),
            initial_capital: 10_000_000.0,
            monthly_expenses: 2_000_000.0,
            expected_revenue: 5_000_000.0,
            profit_margin: 30.0,
        }
    }

    #[test]
    fn recorded_calculation_is_listed_and_latest() {
        let now = datetime!(2024-06-10 14:00 +7);
        let st = state_at(now);
        let key = HistoryKey::Anonymous;

        let rec = record_calculation(&st, &key, &input("Laundry")).unwrap();
        assert_eq!(rec.timestamp, now);
        assert_eq!(list_history(&st, &key, HistoryFilter::Today).unwrap(), vec![rec.clone()]);
        assert_eq!(last_result(&st, &key).unwrap(), Some(rec));
    }

    #[test]
    fn respects_configured_limit() {
        let st = state_at(datetime!(2024-06-10 14:00 UTC));
        let mut config = (*st.config).clone();
        config.history_limit = 3;
        let st = AppState::from_parts(config.into(), st.store, st.clock);

        for i in 0..5 {
            record_calculation(&st, &HistoryKey::Anonymous, &input(&format!("u{i}"))).unwrap();
        }
        let names: Vec<_> = list_history(&st, &HistoryKey::Anonymous, HistoryFilter::All)
            .unwrap()
            .into_iter()
            .map(|r| r.business_name)
            .collect();
        assert_eq!(names, ["u4", "u3", "u2"]);
    }

    #[test]
    fn configured_limit_above_ten_still_keeps_ten() {
        let st = state_at(datetime!(2024-06-10 14:00 UTC));
        let mut config = (*st.config).clone();
        config.history_limit = 25;
        let st = AppState::from_parts(config.into(), st.store, st.clock);

        for i in 0..15 {
            record_calculation(&st, &HistoryKey::Anonymous, &input(&format!("u{i}"))).unwrap();
        }
        let records = list_history(&st, &HistoryKey::Anonymous, HistoryFilter::All).unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].business_name, "u14");
    }
}
