//! Day-scoped wellness tip cache.

use super::catalog::TipCategory;
use crate::clock::Clock;
use crate::storage::{KeyValueStore, keys};
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The single cache entry stored under `daily_wellness_tips`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTipCache {
    pub date: NaiveDate,
    #[serde(default)]
    pub tips: BTreeMap<String, String>,
}

impl DailyTipCache {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            tips: BTreeMap::new(),
        }
    }
}

/// Picks one tip per category per day and remembers it in durable storage.
///
/// Never fails: unreadable cache content is treated as an empty cache and
/// write failures only cost the memoization.
pub struct DailyTips {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl DailyTips {
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Today's tip for `category`.
    pub fn tip_for(&self, category: &str) -> String {
        self.tip_with_rng(category, &mut rand::thread_rng())
    }

    /// Same as [`tip_for`](Self::tip_for) with a caller-supplied generator.
    pub fn tip_with_rng<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> String {
        let key = category.to_lowercase();
        let today = self.clock.today();
        let mut cache = self.load(today);

        if let Some(tip) = cache.tips.get(&key) {
            return tip.clone();
        }

        let tips = TipCategory::resolve(&key).tips();
        let tip = tips.choose(rng).copied().unwrap_or(GENERAL_FALLBACK).to_string();

        cache.tips.insert(key, tip.clone());
        self.store(&cache);

        tip
    }

    /// Reads the cache entry for `today`; an entry from any other day is discarded.
    fn load(&self, today: NaiveDate) -> DailyTipCache {
        let raw = match self.storage.get(keys::DAILY_WELLNESS_TIPS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return DailyTipCache::empty(today),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read daily tip cache");
                return DailyTipCache::empty(today);
            }
        };

        match serde_json::from_str::<DailyTipCache>(&raw) {
            Ok(cache) if cache.date == today => cache,
            Ok(_) => {
                tracing::debug!("Discarding daily tip cache from a previous day");
                DailyTipCache::empty(today)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Daily tip cache is unreadable, starting fresh");
                DailyTipCache::empty(today)
            }
        }
    }

    fn store(&self, cache: &DailyTipCache) {
        let result = serde_json::to_string(cache)
            .map_err(crate::DeskError::from)
            .and_then(|raw| self.storage.set(keys::DAILY_WELLNESS_TIPS, &raw));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to save daily tip cache");
        }
    }
}

const GENERAL_FALLBACK: &str = "Take regular breaks every hour to stretch and rest your eyes.";
