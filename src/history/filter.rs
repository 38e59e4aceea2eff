use std::fmt;
use std::str::FromStr;

use time::{Duration, OffsetDateTime, Time};

/// Time window applied when listing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    /// Since midnight of the current day, in the offset of `now`.
    Today,
    Last7Days,
    Last30Days,
}

impl HistoryFilter {
    /// Earliest timestamp the filter admits, or `None` for no bound.
    pub fn since(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            HistoryFilter::All => None,
            HistoryFilter::Today => Some(now.replace_time(Time::MIDNIGHT)),
            HistoryFilter::Last7Days => Some(now - Duration::days(7)),
            HistoryFilter::Last30Days => Some(now - Duration::days(30)),
        }
    }

    pub fn matches(self, timestamp: OffsetDateTime, now: OffsetDateTime) -> bool {
        self.since(now).map_or(true, |since| timestamp >= since)
    }
}

impl FromStr for HistoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "7d" | "week" | "last-7-days" => Ok(Self::Last7Days),
            "30d" | "month" | "last-30-days" => Ok(Self::Last30Days),
            other => Err(format!(
                "unknown history filter `{other}` (expected all, today, 7d or 30d)"
            )),
        }
    }
}

impl fmt::Display for HistoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HistoryFilter::All => "all",
            HistoryFilter::Today => "today",
            HistoryFilter::Last7Days => "7d",
            HistoryFilter::Last30Days => "30d",
        })
    }
}
