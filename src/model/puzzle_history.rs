use serde::{Deserialize, Serialize};

/// Attempt and completion ledger for a single puzzle identifier.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PuzzleHistoryRecord {
    pub attempts: u32,
    pub completions: u32,
    pub wins: u32,
    pub best_mistakes: Option<u32>,
    pub has_won: bool,
    /// Epoch milliseconds
    pub last_attempted: Option<i64>,
    /// Epoch milliseconds
    pub last_completed: Option<i64>,
}

impl PuzzleHistoryRecord {
    pub fn attempted(&self, now_ms: i64) -> PuzzleHistoryRecord {
        PuzzleHistoryRecord {
            attempts: self.attempts + 1,
            last_attempted: Some(now_ms),
            ..self.clone()
        }
    }

    pub fn completed(&self, mistakes: u32, won: bool, now_ms: i64) -> PuzzleHistoryRecord {
        let mut next = self.clone();
        next.completions += 1;
        next.last_completed = Some(now_ms);
        if won {
            next.wins += 1;
            next.best_mistakes = Some(match self.best_mistakes {
                Some(best) => best.min(mistakes),
                None => mistakes,
            });
            next.has_won = true;
        }
        next
    }
}
