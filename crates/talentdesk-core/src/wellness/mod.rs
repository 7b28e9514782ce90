//! Wellness domain module.
//!
//! - `catalog`: fixed per-category tip lists
//! - `daily_tips`: one tip per category per calendar day, memoized in durable storage

mod catalog;
mod daily_tips;

pub use catalog::TipCategory;
pub use daily_tips::{DailyTipCache, DailyTips};
