use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use time::UtcDateTime;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u8,
}

impl YearMonth {
    #[must_use]
    pub fn of(instant: UtcDateTime) -> Self {
        Self {
            year: instant.year(),
            month: instant.month().into(),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub struct ArchiveBucket {
    pub year: i32,
    pub month: u8,
    #[serde(default)]
    pub count: u32,
}

impl ArchiveBucket {
    #[must_use]
    pub fn key(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    #[must_use]
    pub fn year_label(&self) -> String {
        format!("{:04}", self.year)
    }

    #[must_use]
    pub fn month_label(&self) -> String {
        format!("{:02}", self.month)
    }

    #[must_use]
    pub fn month_name(&self) -> Option<&'static str> {
        month_name(self.month.into())
    }
}

#[must_use]
pub fn month_name(month: i64) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_NAMES.get(index).copied()
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ArchiveCounter {
    counts: BTreeMap<YearMonth, u32>,
    recorded: u64,
}

impl ArchiveCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, instant: UtcDateTime) {
        let count = self.counts.entry(YearMonth::of(instant)).or_insert(0);
        *count = count.saturating_add(1);
        self.recorded += 1;
    }

    #[must_use]
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    #[must_use]
    pub fn into_buckets(self) -> Vec<ArchiveBucket> {
        self.counts
            .into_iter()
            .rev()
            .map(|(key, count)| ArchiveBucket {
                year: key.year,
                month: key.month,
                count,
            })
            .collect()
    }
}

impl Extend<UtcDateTime> for ArchiveCounter {
    fn extend<T: IntoIterator<Item = UtcDateTime>>(&mut self, iter: T) {
        for instant in iter {
            self.record(instant);
        }
    }
}

impl FromIterator<UtcDateTime> for ArchiveCounter {
    fn from_iter<T: IntoIterator<Item = UtcDateTime>>(iter: T) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}

/// Combines buckets sharing a month by summing their counts.
///
/// Keys keep the order in which they were first seen. This always sums, so
/// merging a set of buckets with itself doubles every count.
#[must_use]
pub fn merge_buckets(buckets: impl IntoIterator<Item = ArchiveBucket>) -> Vec<ArchiveBucket> {
    let mut merged: Vec<ArchiveBucket> = Vec::new();
    let mut positions: HashMap<YearMonth, usize> = HashMap::new();

    for bucket in buckets {
        if let Some(&position) = positions.get(&bucket.key()) {
            let existing = &mut merged[position];
            existing.count = existing.count.saturating_add(bucket.count);
        } else {
            positions.insert(bucket.key(), merged.len());
            merged.push(bucket);
        }
    }

    merged
}
