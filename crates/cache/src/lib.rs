//! # Cache — cross-hour article metadata
//!
//! The container's topic index must list one timestamp row for **every**
//! article published in the current rolling day, but each hourly run only
//! fetches content for its own hour. This crate is the persistent state
//! that bridges the gap: after a run finalizes its article ids it writes a
//! lightweight record per article, and the next run reads the other 23
//! hour-slots back to rebuild the full day's index without re-fetching
//! anything.
//!
//! ## On-disk layout
//!
//! One JSON file per (hour, country, language) tuple:
//!
//! ```text
//! {dir}/cache_{hour}_{country}_{language}.news
//! [{"id":1,"timestamp":13821480,"topic":2,"title":"..."}, ...]
//! ```
//!
//! Each slot is overwritten wholesale every time its hour runs again, so a
//! slot never holds more than one day's worth of data.
//!
//! ## Failure contract
//!
//! A *missing* hour file only means that hour has not run yet this cycle,
//! so it is skipped silently. A file that exists but fails to parse is a real
//! error: propagating garbage ids into the index would corrupt the day's
//! history, so the run must abort. Likewise a failed save is fatal for the
//! caller, because a silently dropped hour makes every later run's index
//! incomplete.

use feed::Topic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The bare minimum remembered about an already-published article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedArticle {
    /// 1-based article id the hour assigned.
    pub id: u32,
    /// Client-epoch minutes at which the article was published.
    pub timestamp: u32,
    /// Category bucket, wire-encoded as an integer.
    pub topic: Topic,
    /// Title, fed back to scrapers for duplicate suppression.
    pub title: String,
}

/// Errors from reading or writing cache slots.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Filesystem failure other than a missing slot.
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),

    /// A slot exists but does not parse.
    #[error("malformed cache file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Handle to one locale's 24 cache slots.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    country_code: u8,
    language_code: u8,
}

impl CacheStore {
    /// Creates a store rooted at `dir` for one (country, language) pair.
    /// Nothing touches the filesystem until load or save.
    #[must_use]
    pub fn new<P: AsRef<Path>>(dir: P, country_code: u8, language_code: u8) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            country_code,
            language_code,
        }
    }

    /// Path of the slot file for `hour`.
    #[must_use]
    pub fn slot_path(&self, hour: u8) -> PathBuf {
        self.dir.join(format!(
            "cache_{}_{}_{}.news",
            hour, self.country_code, self.language_code
        ))
    }

    /// Reads every hour-slot except `current_hour`, concatenating their
    /// records in hour order.
    ///
    /// Missing or unreadable slots are skipped (that hour simply has no
    /// data yet); a slot that parses incorrectly returns
    /// [`CacheError::Malformed`].
    pub fn load_other_hours(&self, current_hour: u8) -> Result<Vec<CachedArticle>, CacheError> {
        let mut records = Vec::new();

        for hour in 0..24u8 {
            if hour == current_hour {
                continue;
            }

            let path = self.slot_path(hour);
            let data = match std::fs::read_to_string(&path) {
                Ok(data) => data,
                Err(err) => {
                    tracing::debug!(hour, error = %err, "cache slot not readable, skipping");
                    continue;
                }
            };

            let mut slot: Vec<CachedArticle> =
                serde_json::from_str(&data).map_err(|source| CacheError::Malformed {
                    path: path.display().to_string(),
                    source,
                })?;
            records.append(&mut slot);
        }

        Ok(records)
    }

    /// Overwrites `hour`'s slot with this run's records, creating the cache
    /// directory on first use.
    pub fn save(&self, hour: u8, records: &[CachedArticle]) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir)?;

        let data = serde_json::to_vec(records).map_err(|source| CacheError::Malformed {
            path: self.slot_path(hour).display().to_string(),
            source,
        })?;
        std::fs::write(self.slot_path(hour), data)?;

        tracing::debug!(hour, count = records.len(), "cache slot written");
        Ok(())
    }
}
