use log::{debug, info};
use std::rc::Rc;

use crate::events::EventHandler;
use crate::model::{SessionEvent, StatsRecord};
use crate::store::{load_record, save_record, PersistenceStore, STATS_KEY};

/// Lifetime statistics, persisted in full after every change.
pub struct StatsTracker {
    store: Rc<dyn PersistenceStore>,
    stats: StatsRecord,
}

impl StatsTracker {
    pub fn load(store: Rc<dyn PersistenceStore>) -> Self {
        let stats = load_record(store.as_ref(), STATS_KEY).unwrap_or_default();
        debug!(target: "stats", "Loaded stats: {:?}", stats);
        Self { store, stats }
    }

    pub fn stats(&self) -> &StatsRecord {
        &self.stats
    }

    pub fn win_rate(&self) -> u32 {
        self.stats.win_rate()
    }

    pub fn average_mistakes(&self) -> f64 {
        self.stats.average_mistakes()
    }

    pub fn record(&mut self, event: &SessionEvent) {
        if !event.is_terminal() {
            return;
        }
        self.stats = self.stats.apply(event);
        info!(target: "stats", "Recorded {:?}; now {:?}", event, self.stats);
        self.save();
    }

    pub fn reset(&mut self) {
        self.stats = StatsRecord::default();
        info!(target: "stats", "Stats reset");
        self.save();
    }

    fn save(&self) {
        save_record(self.store.as_ref(), STATS_KEY, &self.stats);
    }
}

impl EventHandler<SessionEvent> for StatsTracker {
    fn handle_event(&mut self, event: &SessionEvent) {
        self.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::BrokenStore;
    use crate::store::MemoryStore;

    #[test]
    fn test_every_event_is_persisted() {
        let store = Rc::new(MemoryStore::new());
        let mut tracker = StatsTracker::load(store.clone());
        tracker.record(&SessionEvent::Win {
            puzzle_id: 1,
            mistakes: 2,
        });

        let reloaded = StatsTracker::load(store.clone());
        assert_eq!(reloaded.stats().games_won, 1);
        assert_eq!(reloaded.stats().total_mistakes, 2);
        assert_eq!(reloaded.win_rate(), 100);
        assert_eq!(reloaded.average_mistakes(), 2.0);
    }

    #[test]
    fn test_reset_persists_zeroes() {
        let store = Rc::new(MemoryStore::new());
        let mut tracker = StatsTracker::load(store.clone());
        tracker.record(&SessionEvent::Loss {
            puzzle_id: 1,
            mistakes: 4,
        });
        tracker.reset();

        assert_eq!(tracker.stats(), &StatsRecord::default());
        assert_eq!(StatsTracker::load(store).stats(), &StatsRecord::default());
    }

    #[test]
    fn test_broken_store_keeps_in_memory_counts() {
        let mut tracker = StatsTracker::load(Rc::new(BrokenStore));
        tracker.record(&SessionEvent::Reveal {
            puzzle_id: 1,
            mistakes: 0,
        });
        assert_eq!(tracker.stats().games_revealed, 1);
    }
}
