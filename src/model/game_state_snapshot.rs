use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::TimestampMilliSeconds;

use super::Category;

fn unix_epoch() -> SystemTime {
    UNIX_EPOCH
}

/// The resumable part of an in-progress session.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub puzzle_index: usize,
    #[serde(default)]
    pub solved: Vec<Category>,
    #[serde(default)]
    pub mistakes: u32,
    #[serde(default)]
    pub revealed: bool,
    #[serde_as(as = "TimestampMilliSeconds")]
    #[serde(default = "unix_epoch")]
    pub saved_at: SystemTime,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            puzzle_index: 0,
            solved: Vec::new(),
            mistakes: 0,
            revealed: false,
            saved_at: UNIX_EPOCH,
        }
    }
}

impl SessionSnapshot {
    pub fn new(puzzle_index: usize, solved: Vec<Category>, mistakes: u32, revealed: bool) -> Self {
        Self {
            puzzle_index,
            solved,
            mistakes,
            revealed,
            saved_at: SystemTime::now(),
        }
    }

    /// A snapshot written in the future (clock skew) counts as fresh.
    pub fn is_fresh(&self, now: SystemTime, max_age: Duration) -> bool {
        match now.duration_since(self.saved_at) {
            Ok(age) => age < max_age,
            Err(_) => true,
        }
    }
}
