use log::{debug, info};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::events::EventHandler;
use crate::model::{PuzzleHistoryRecord, SessionEvent};
use crate::store::{load_record, save_record, PersistenceStore, PUZZLE_HISTORY_KEY};

/// Per-puzzle ledger of attempts and completions.
pub struct HistoryTracker {
    store: Rc<dyn PersistenceStore>,
    history: BTreeMap<u32, PuzzleHistoryRecord>,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl HistoryTracker {
    pub fn load(store: Rc<dyn PersistenceStore>) -> Self {
        let history: BTreeMap<u32, PuzzleHistoryRecord> =
            load_record(store.as_ref(), PUZZLE_HISTORY_KEY).unwrap_or_default();
        debug!(target: "history", "Loaded history for {} puzzles", history.len());
        Self { store, history }
    }

    pub fn record_attempt(&mut self, puzzle_id: u32) {
        let record = self.puzzle_stats(puzzle_id).attempted(now_ms());
        info!(target: "history", "Puzzle #{} attempt {}", puzzle_id, record.attempts);
        self.history.insert(puzzle_id, record);
        self.save();
    }

    pub fn record_completion(&mut self, puzzle_id: u32, mistakes: u32, won: bool) {
        let record = self
            .puzzle_stats(puzzle_id)
            .completed(mistakes, won, now_ms());
        info!(
            target: "history",
            "Puzzle #{} completed (won: {}, mistakes: {}, best: {:?})",
            puzzle_id,
            won,
            mistakes,
            record.best_mistakes
        );
        self.history.insert(puzzle_id, record);
        self.save();
    }

    /// The record for `puzzle_id`, zeroed if the puzzle was never played.
    pub fn puzzle_stats(&self, puzzle_id: u32) -> PuzzleHistoryRecord {
        self.history.get(&puzzle_id).cloned().unwrap_or_default()
    }

    pub fn has_played_before(&self, puzzle_id: u32) -> bool {
        self.history
            .get(&puzzle_id)
            .is_some_and(|record| record.attempts > 0)
    }

    pub fn has_won_before(&self, puzzle_id: u32) -> bool {
        self.history
            .get(&puzzle_id)
            .is_some_and(|record| record.has_won)
    }

    pub fn total_puzzles_attempted(&self) -> usize {
        self.history.len()
    }

    pub fn total_puzzles_won(&self) -> usize {
        self.history.values().filter(|record| record.has_won).count()
    }

    pub fn reset_history(&mut self) {
        self.history.clear();
        info!(target: "history", "History reset");
        self.save();
    }

    fn save(&self) {
        save_record(self.store.as_ref(), PUZZLE_HISTORY_KEY, &self.history);
    }
}

impl EventHandler<SessionEvent> for HistoryTracker {
    fn handle_event(&mut self, event: &SessionEvent) {
        match *event {
            // only an untouched session that is not a resume counts as a new attempt
            SessionEvent::Started {
                puzzle_id,
                resumed: false,
                solved: 0,
                mistakes: 0,
            } => self.record_attempt(puzzle_id),
            SessionEvent::Started { .. } => (),
            SessionEvent::Win {
                puzzle_id,
                mistakes,
            } => self.record_completion(puzzle_id, mistakes, true),
            SessionEvent::Loss {
                puzzle_id,
                mistakes,
            }
            | SessionEvent::Reveal {
                puzzle_id,
                mistakes,
            } => self.record_completion(puzzle_id, mistakes, false),
        }
    }
}
