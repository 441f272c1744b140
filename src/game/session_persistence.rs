use log::{debug, trace};
use std::rc::Rc;
use std::time::{Duration, SystemTime};

use super::session_engine::SessionEngine;
use crate::model::SessionSnapshot;
use crate::store::{clear_record, load_record, save_record, PersistenceStore, GAME_STATE_KEY};

/// Mirrors the live session into the store so it can be resumed.
pub struct SessionPersistence {
    store: Rc<dyn PersistenceStore>,
    max_age: Duration,
}

impl SessionPersistence {
    pub fn new(store: Rc<dyn PersistenceStore>, max_age: Duration) -> Self {
        Self { store, max_age }
    }

    /// The saved snapshot, if one exists and was written within the max age.
    pub fn load(&self) -> Option<SessionSnapshot> {
        self.load_at(SystemTime::now())
    }

    pub fn load_at(&self, now: SystemTime) -> Option<SessionSnapshot> {
        let snapshot: SessionSnapshot = load_record(self.store.as_ref(), GAME_STATE_KEY)?;
        if snapshot.is_fresh(now, self.max_age) {
            Some(snapshot)
        } else {
            debug!(target: "store", "Ignoring expired snapshot for index {}", snapshot.puzzle_index);
            None
        }
    }

    /// Like `load`, but falls back to the zeroed snapshot.
    pub fn load_or_default(&self) -> SessionSnapshot {
        self.load().unwrap_or_default()
    }

    /// Saves the session while it is in progress and clears it once it is over.
    pub fn sync(&self, engine: &SessionEngine) {
        if engine.is_terminal() {
            self.clear();
        } else {
            trace!(target: "store", "Saving snapshot for index {}", engine.puzzle_index());
            save_record(self.store.as_ref(), GAME_STATE_KEY, &engine.snapshot());
        }
    }

    pub fn clear(&self) {
        clear_record(self.store.as_ref(), GAME_STATE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::game::settings::Settings;
    use crate::model::sample_puzzle;
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::UNIX_EPOCH;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn engine(index: usize) -> SessionEngine {
        let (emitter, _observer) = Channel::new();
        SessionEngine::new(
            index,
            &sample_puzzle(1),
            None,
            &Settings::default(),
            StdRng::seed_from_u64(1),
            emitter,
        )
    }

    #[test]
    fn test_sync_saves_in_progress_session() {
        let store = Rc::new(MemoryStore::new());
        let persistence = SessionPersistence::new(store.clone(), DAY);
        let mut engine = engine(2);
        for word in ["OAK", "ASH", "ELM", "FIR"] {
            engine.toggle_word_selection(word);
        }
        engine.submit();
        persistence.sync(&engine);

        let snapshot = persistence.load().unwrap();
        assert_eq!(snapshot.puzzle_index, 2);
        assert_eq!(snapshot.solved.len(), 1);
        assert_eq!(snapshot.solved[0].name, "Trees");
        assert_eq!(snapshot.mistakes, 0);
        assert!(!snapshot.revealed);
    }

    #[test]
    fn test_sync_clears_finished_session() {
        let store = Rc::new(MemoryStore::new());
        let persistence = SessionPersistence::new(store.clone(), DAY);
        let mut engine = engine(0);
        persistence.sync(&engine);
        assert!(store.contains(GAME_STATE_KEY));

        engine.reveal_solution();
        persistence.sync(&engine);
        assert!(!store.contains(GAME_STATE_KEY));
        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn test_snapshot_older_than_a_day_is_absent() {
        let store = Rc::new(MemoryStore::new());
        let persistence = SessionPersistence::new(store.clone(), DAY);
        let saved_at = SystemTime::now() - DAY - Duration::from_secs(60);
        let millis = saved_at.duration_since(UNIX_EPOCH).unwrap().as_millis();
        store
            .write(
                GAME_STATE_KEY,
                &format!(
                    r#"{{"puzzleIndex":5,"solved":[],"mistakes":2,"revealed":false,"savedAt":{}}}"#,
                    millis
                ),
            )
            .unwrap();

        assert!(store.contains(GAME_STATE_KEY));
        assert_eq!(persistence.load(), None);
        assert_eq!(persistence.load_or_default(), SessionSnapshot::default());
    }

    #[test]
    fn test_recent_snapshot_is_returned() {
        let store = Rc::new(MemoryStore::new());
        let persistence = SessionPersistence::new(store.clone(), DAY);
        let snapshot = SessionSnapshot::new(3, vec![], 1, false);
        save_record(&*store, GAME_STATE_KEY, &snapshot);

        let later = snapshot.saved_at + Duration::from_secs(23 * 60 * 60);
        let loaded = persistence.load_at(later).unwrap();
        assert_eq!(loaded.puzzle_index, 3);
        assert_eq!(loaded.mistakes, 1);
    }

    #[test]
    fn test_malformed_snapshot_is_absent() {
        let store = Rc::new(MemoryStore::new());
        store.write(GAME_STATE_KEY, "[1, 2").unwrap();
        let persistence = SessionPersistence::new(store, DAY);
        assert_eq!(persistence.load_or_default(), SessionSnapshot::default());
    }
}
