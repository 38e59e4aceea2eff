use time::OffsetDateTime;
use tracing::{debug, info};

use super::{HistoryFilter, HistoryKey};
use crate::calc::CalculationRecord;
use crate::config::MAX_HISTORY_LIMIT;
use crate::error::StorageError;
use crate::storage::{read_json, write_json, KeyValueStore};

/// Bounded, newest-first calculation lists, one per `HistoryKey`.
pub struct HistoryRepo<'a> {
    store: &'a dyn KeyValueStore,
    limit: usize,
}

impl<'a> HistoryRepo<'a> {
    /// `limit` is clamped to `1..=MAX_HISTORY_LIMIT`.
    pub fn new(store: &'a dyn KeyValueStore, limit: usize) -> Self {
        Self {
            store,
            limit: limit.clamp(1, MAX_HISTORY_LIMIT),
        }
    }

    fn load(&self, key: &HistoryKey) -> Result<Vec<CalculationRecord>, StorageError> {
        Ok(read_json(self.store, &key.storage_key())?.unwrap_or_default())
    }

    /// Puts `record` first and drops whatever falls past the limit.
    pub fn append(&self, key: &HistoryKey, record: CalculationRecord) -> Result<(), StorageError> {
        let mut records = self.load(key)?;
        records.insert(0, record);
        let evicted = records.len().saturating_sub(self.limit);
        records.truncate(self.limit);
        write_json(self.store, &key.storage_key(), &records)?;
        info!(%key, len = records.len(), evicted, "history appended");
        Ok(())
    }

    /// Records admitted by `filter` relative to `now`, newest first. Reads
    /// the stored list each time and never modifies it.
    pub fn list(
        &self,
        key: &HistoryKey,
        filter: HistoryFilter,
        now: OffsetDateTime,
    ) -> Result<Vec<CalculationRecord>, StorageError> {
        let records: Vec<_> = self
            .load(key)?
            .into_iter()
            .filter(|r| filter.matches(r.timestamp, now))
            .collect();
        debug!(%key, %filter, len = records.len(), "history listed");
        Ok(records)
    }

    pub fn latest(&self, key: &HistoryKey) -> Result<Option<CalculationRecord>, StorageError> {
        Ok(self.load(key)?.into_iter().next())
    }

    pub fn clear(&self, key: &HistoryKey) -> Result<(), StorageError> {
        self.store.remove(&key.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::{calculate, CalculationInput};
    use crate::storage::{FileStore, MemoryStore};
    use time::macros::datetime;
    use time::Duration;
    use crate::auth::UserId;

    fn record(name: &str, at: OffsetDateTime) -> CalculationRecord {
        calculate(
            &CalculationInput {
                business_name: name.into(),
                initial_capital: 1_000_000.0,
                monthly_expenses: 200_000.0,
                expected_revenue: 500_000.0,
                profit_margin: 40.0,
            },
            at,
        )
    }

    #[test]
    fn keeps_ten_newest_first() {
        let store = MemoryStore::new();
        let repo = HistoryRepo::new(&store, 10);
        let start = datetime!(2024-06-01 08:00 UTC);
        for i in 0..11 {
            repo.append(
                &HistoryKey::Anonymous,
                record(&format!("usaha-{i}"), start + Duration::minutes(i)),
            )
            .unwrap();
        }

        let all = repo
            .list(&HistoryKey::Anonymous, HistoryFilter::All, start + Duration::hours(1))
            .unwrap();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].business_name, "usaha-10");
        assert_eq!(all[9].business_name, "usaha-1");
        assert!(all.iter().all(|r| r.business_name != "usaha-0"));
        assert!(all.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[test]
    fn oversized_limit_is_clamped_to_ten() {
        let store = MemoryStore::new();
        let repo = HistoryRepo::new(&store, 25);
        let start = datetime!(2024-06-01 08:00 UTC);
        for i in 0..15 {
            repo.append(
                &HistoryKey::Anonymous,
                record(&format!("usaha-{i}"), start + Duration::minutes(i)),
            )
            .unwrap();
        }
        let latest = repo.latest(&HistoryKey::Anonymous).unwrap();
        assert_eq!(latest.map(|r| r.business_name), Some("usaha-14".to_string()));
        let stored = repo
            .list(&HistoryKey::Anonymous, HistoryFilter::All, start + Duration::hours(1))
            .unwrap();
        assert_eq!(stored.len(), 10);
        assert_eq!(stored[9].business_name, "usaha-5");
    }

    #[test]
    fn today_filter_excludes_records_before_midnight() {
        let store = MemoryStore::new();
        let repo = HistoryRepo::new(&store, 10);
        let key = HistoryKey::User(UserId::generate());
        repo.append(&key, record("kemarin", datetime!(2024-06-09 23:50 +7))).unwrap();
        repo.append(&key, record("pagi", datetime!(2024-06-10 00:05 +7))).unwrap();

        let now = datetime!(2024-06-10 14:00 +7);
        let today = repo.list(&key, HistoryFilter::Today, now).unwrap();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].business_name, "pagi");

        // filtering does not touch the stored list
        assert_eq!(repo.list(&key, HistoryFilter::All, now).unwrap().len(), 2);
    }

    #[test]
    fn keys_are_isolated() {
        let store = MemoryStore::new();
        let repo = HistoryRepo::new(&store, 10);
        let user = HistoryKey::User(UserId::generate());
        let now = datetime!(2024-06-10 14:00 UTC);
        repo.append(&user, record("milik user", now)).unwrap();

        assert!(repo.list(&HistoryKey::Anonymous, HistoryFilter::All, now).unwrap().is_empty());
        assert_eq!(repo.latest(&user).unwrap().unwrap().business_name, "milik user");

        repo.clear(&user).unwrap();
        assert_eq!(repo.latest(&user).unwrap(), None);
    }

    #[test]
    fn history_roundtrips_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let key = HistoryKey::Anonymous;
        let now = datetime!(2024-06-10 14:00 +7);
        let first = record("satu", now - Duration::hours(2));
        let second = record("dua", now);
        {
            let store = FileStore::new(dir.path());
            let repo = HistoryRepo::new(&store, 10);
            repo.append(&key, first.clone()).unwrap();
            repo.append(&key, second.clone()).unwrap();
        }

        let store = FileStore::new(dir.path());
        let listed = HistoryRepo::new(&store, 10)
            .list(&key, HistoryFilter::All, now)
            .unwrap();
        assert_eq!(listed, vec![second, first]);
    }
}
