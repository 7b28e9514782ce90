//! Calendar source for day-scoped caching.

use chrono::{NaiveDate, Utc};
use std::sync::Mutex;

/// Supplies the current calendar day.
pub trait Clock: Send + Sync {
    /// Today's date. Day boundaries follow UTC.
    fn today(&self) -> NaiveDate;

    /// Current instant as an RFC 3339 string, used to stamp local records.
    fn now_rfc3339(&self) -> String {
        Utc::now().to_rfc3339()
    }
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a settable date.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    /// Moves the clock to another day.
    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(|e| e.into_inner()) = date;
    }

    /// Moves the clock forward by `days`.
    pub fn advance_days(&self, days: u64) {
        let mut date = self.date.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = date.checked_add_days(chrono::Days::new(days)) {
            *date = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(|e| e.into_inner())
    }
}
