use log::{info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Instant;

use super::catalog::PuzzleCatalog;
use super::history_tracker::HistoryTracker;
use super::removal_scheduler::RemovalScheduler;
use super::session_engine::{SessionEngine, SubmitOutcome};
use super::session_persistence::SessionPersistence;
use super::settings::Settings;
use super::stats_tracker::StatsTracker;
use crate::events::{Channel, EventEmitter, Unsubscriber};
use crate::model::{GameCommand, SessionEvent};
use crate::store::PersistenceStore;

/// Owns the active session and everything that reacts to it.
pub struct GameController<C: PuzzleCatalog> {
    catalog: C,
    settings: Settings,
    persistence: SessionPersistence,
    stats: Rc<RefCell<StatsTracker>>,
    history: Rc<RefCell<HistoryTracker>>,
    scheduler: RemovalScheduler,
    rng: StdRng,
    event_emitter: EventEmitter<SessionEvent>,
    _subscriptions: Vec<Unsubscriber<SessionEvent>>,
    engine: SessionEngine,
}

impl<C: PuzzleCatalog> GameController<C> {
    /// Loads stats, history and any fresh snapshot, then starts the session
    /// the player was last working on (or the first puzzle).
    pub fn new(
        catalog: C,
        store: Rc<dyn PersistenceStore>,
        settings: Settings,
        seed: Option<u64>,
    ) -> Self {
        let (event_emitter, event_observer) = Channel::<SessionEvent>::new();
        let stats = Rc::new(RefCell::new(StatsTracker::load(store.clone())));
        let history = Rc::new(RefCell::new(HistoryTracker::load(store.clone())));
        let subscriptions = vec![
            event_observer.subscribe_handler(stats.clone()),
            event_observer.subscribe_handler(history.clone()),
        ];
        let persistence = SessionPersistence::new(store, settings.snapshot_max_age());
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        let mut rng = StdRng::seed_from_u64(seed);
        trace!(target: "session", "Controller seed: {}", seed);

        let snapshot = persistence.load();
        let index = snapshot
            .as_ref()
            .map_or(0, |s| s.puzzle_index.min(catalog.count() - 1));
        let engine = SessionEngine::new(
            index,
            catalog.get(index),
            snapshot.as_ref(),
            &settings,
            StdRng::seed_from_u64(rng.next_u64()),
            event_emitter.clone(),
        );
        persistence.sync(&engine);

        Self {
            catalog,
            settings,
            persistence,
            stats,
            history,
            scheduler: RemovalScheduler::new(),
            rng,
            event_emitter,
            _subscriptions: subscriptions,
            engine,
        }
    }

    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> Ref<'_, StatsTracker> {
        self.stats.borrow()
    }

    pub fn history(&self) -> Ref<'_, HistoryTracker> {
        self.history.borrow()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn pending_removals(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn handle_command(&mut self, command: GameCommand) {
        trace!(target: "session", "Handling command: {:?}", command);
        match command {
            GameCommand::Select(word) => {
                self.select(&word);
            }
            GameCommand::Submit => {
                self.submit();
            }
            GameCommand::Shuffle => self.shuffle(),
            GameCommand::ClearSelection => self.clear_selection(),
            GameCommand::Reveal => self.reveal(),
            GameCommand::Previous => {
                self.previous();
            }
            GameCommand::Next => {
                self.next();
            }
            GameCommand::Random => self.random(),
            GameCommand::JumpTo(number) => {
                self.jump_to(number);
            }
            GameCommand::Reset => self.reset(),
            GameCommand::ResetStats => self.reset_stats(),
            GameCommand::ResetHistory => self.reset_history(),
        }
    }

    pub fn select(&mut self, word: &str) -> bool {
        let changed = self.engine.toggle_word_selection(word);
        if changed {
            self.persistence.sync(&self.engine);
        }
        changed
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.engine.submit();
        if let SubmitOutcome::Correct(category) = &outcome {
            let due = Instant::now() + self.settings.removal_delay();
            self.scheduler.schedule(self.engine.removal_for(category, due));
        }
        if outcome != SubmitOutcome::Ignored {
            self.persistence.sync(&self.engine);
        }
        outcome
    }

    pub fn shuffle(&mut self) {
        if self.engine.shuffle() {
            self.persistence.sync(&self.engine);
        }
    }

    pub fn clear_selection(&mut self) {
        self.engine.clear_selection();
        self.persistence.sync(&self.engine);
    }

    pub fn reveal(&mut self) {
        if self.engine.reveal_solution() {
            self.persistence.sync(&self.engine);
        }
    }

    /// Applies every removal whose delay has elapsed by `now`.
    pub fn run_due_tasks(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        for task in self.scheduler.take_due(now) {
            if self.engine.apply_removal(&task) {
                applied += 1;
            }
        }
        applied
    }

    pub fn previous(&mut self) -> bool {
        let index = self.engine.puzzle_index();
        if index == 0 {
            return false;
        }
        self.switch_to(index - 1);
        true
    }

    pub fn next(&mut self) -> bool {
        let index = self.engine.puzzle_index();
        if index + 1 >= self.catalog.count() {
            return false;
        }
        self.switch_to(index + 1);
        true
    }

    pub fn random(&mut self) {
        let index = self.rng.random_range(0..self.catalog.count());
        self.switch_to(index);
    }

    /// Jumps to a 1-based puzzle number; out-of-range numbers are ignored.
    pub fn jump_to(&mut self, number: usize) -> bool {
        if number < 1 || number > self.catalog.count() {
            warn!(
                target: "session",
                "Puzzle number {} is outside 1..={}",
                number,
                self.catalog.count()
            );
            return false;
        }
        self.switch_to(number - 1);
        true
    }

    /// Abandons the current attempt and starts the same puzzle over.
    pub fn reset(&mut self) {
        self.switch_to(self.engine.puzzle_index());
    }

    pub fn reset_stats(&mut self) {
        self.stats.borrow_mut().reset();
    }

    pub fn reset_history(&mut self) {
        self.history.borrow_mut().reset_history();
    }

    fn switch_to(&mut self, index: usize) {
        self.persistence.clear();
        self.scheduler.cancel_all();
        info!(target: "session", "Switching to puzzle index {}", index);
        self.engine = self.start_session(index);
        self.persistence.sync(&self.engine);
    }

    fn start_session(&mut self, index: usize) -> SessionEngine {
        SessionEngine::new(
            index,
            self.catalog.get(index),
            None,
            &self.settings,
            StdRng::seed_from_u64(self.rng.next_u64()),
            self.event_emitter.clone(),
        )
    }
}
