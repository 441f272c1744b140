use itertools::Itertools;
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::time::Instant;
use uuid::Uuid;

use super::removal_scheduler::ScheduledRemoval;
use super::settings::{FeedbackRule, Settings};
use super::shuffle::shuffled;
use crate::events::EventEmitter;
use crate::model::{Category, Puzzle, SessionEvent, SessionSnapshot, StatusMessage, Word};

pub const SELECTION_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
    Revealed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The session is already over
    Ignored,
    /// Fewer or more than four words were selected
    Invalid,
    /// All four words share the named category
    Correct(String),
    /// Wrong guess, with the feedback tier shown to the player
    Mistake(StatusMessage),
}

/// State of one attempt at one puzzle.
///
/// Playing is the only non-terminal status. The first move into Won, Lost or
/// Revealed sets `terminal_event_recorded`, and only that move emits an event.
pub struct SessionEngine {
    puzzle: Puzzle,
    puzzle_index: usize,
    session_id: Uuid,
    pool: Vec<Word>,
    selected: Vec<String>,
    solved: Vec<Category>,
    mistakes: u32,
    revealed: bool,
    status: SessionStatus,
    terminal_event_recorded: bool,
    message: Option<StatusMessage>,
    resumed: bool,
    max_mistakes: u32,
    feedback_rule: FeedbackRule,
    rng: StdRng,
    event_emitter: EventEmitter<SessionEvent>,
}

impl SessionEngine {
    /// Starts a session, restoring `snapshot` when it belongs to this puzzle and has progress.
    pub fn new(
        puzzle_index: usize,
        puzzle: &Puzzle,
        snapshot: Option<&SessionSnapshot>,
        settings: &Settings,
        mut rng: StdRng,
        event_emitter: EventEmitter<SessionEvent>,
    ) -> Self {
        let resumed = snapshot.is_some_and(|s| s.puzzle_index == puzzle_index);
        let restorable = snapshot.filter(|s| resumed && !s.solved.is_empty());

        let solved: Vec<Category> = match restorable {
            Some(snapshot) => snapshot
                .solved
                .iter()
                .filter_map(|saved| match puzzle.category(&saved.name) {
                    Some(category) => Some(Category {
                        revealed: saved.revealed,
                        ..category.clone()
                    }),
                    None => {
                        warn!(target: "session", "Dropping unknown saved category {:?}", saved.name);
                        None
                    }
                })
                .unique_by(|c| c.name.clone())
                .collect(),
            None => Vec::new(),
        };
        // solved words stay in the pool; unsolved_words() filters by category
        let pool = shuffled(&puzzle.all_words(), &mut rng);

        let mut engine = Self {
            puzzle: puzzle.clone(),
            puzzle_index,
            session_id: Uuid::new_v4(),
            pool,
            selected: Vec::new(),
            solved,
            mistakes: restorable.map_or(0, |s| s.mistakes),
            revealed: false,
            status: SessionStatus::Playing,
            terminal_event_recorded: false,
            message: None,
            resumed,
            max_mistakes: settings.max_mistakes,
            feedback_rule: settings.feedback_rule,
            rng,
            event_emitter,
        };
        if restorable.is_some_and(|s| s.revealed) {
            // a revealed session is terminal; its event was emitted before it was saved
            engine.revealed = true;
            engine.status = SessionStatus::Revealed;
            engine.terminal_event_recorded = true;
        }

        info!(
            target: "session",
            "Session {} started for puzzle #{} (index {}); resumed: {}, solved: {}, mistakes: {}",
            engine.session_id,
            engine.puzzle.id,
            puzzle_index,
            resumed,
            engine.solved.len(),
            engine.mistakes
        );
        engine.event_emitter.emit(&SessionEvent::Started {
            puzzle_id: engine.puzzle.id,
            resumed,
            solved: engine.solved.len(),
            mistakes: engine.mistakes,
        });
        engine
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn puzzle_index(&self) -> usize {
        self.puzzle_index
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Every word still in the pool, including a just-solved category awaiting removal.
    pub fn pool(&self) -> &[Word] {
        &self.pool
    }

    /// Pool words whose category is not solved yet.
    pub fn unsolved_words(&self) -> Vec<&Word> {
        self.pool
            .iter()
            .filter(|w| !self.is_category_solved(&w.category))
            .collect()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, text: &str) -> bool {
        self.selected.iter().any(|s| s == text)
    }

    pub fn solved(&self) -> &[Category] {
        &self.solved
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn mistakes_remaining(&self) -> u32 {
        self.max_mistakes.saturating_sub(self.mistakes)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status != SessionStatus::Playing
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn was_resumed(&self) -> bool {
        self.resumed
    }

    pub fn message(&self) -> Option<StatusMessage> {
        self.message
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.puzzle_index,
            self.solved.clone(),
            self.mistakes,
            self.revealed,
        )
    }

    fn is_category_solved(&self, name: &str) -> bool {
        self.solved.iter().any(|c| c.name == name)
    }

    fn word(&self, text: &str) -> Option<&Word> {
        self.pool.iter().find(|w| w.text == text)
    }

    /// Returns whether the selection changed.
    pub fn toggle_word_selection(&mut self, text: &str) -> bool {
        if self.is_terminal() {
            return false;
        }
        let Some(word) = self.word(text) else {
            debug!(target: "session", "Ignoring selection of unknown word {:?}", text);
            return false;
        };
        if self.is_category_solved(&word.category) {
            return false;
        }

        if let Some(position) = self.selected.iter().position(|s| s == text) {
            self.selected.remove(position);
            true
        } else if self.selected.len() < SELECTION_SIZE {
            self.selected.push(text.to_string());
            true
        } else {
            false
        }
    }

    /// Reorders the unsolved words; solved words keep their place at the front.
    pub fn shuffle(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        let (solved_words, unsolved_words): (Vec<Word>, Vec<Word>) = self
            .pool
            .iter()
            .cloned()
            .partition(|w| self.is_category_solved(&w.category));
        let mut pool = solved_words;
        pool.extend(shuffled(&unsolved_words, &mut self.rng));
        self.pool = pool;
        self.message = None;
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.message = None;
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_terminal() {
            return SubmitOutcome::Ignored;
        }
        if self.selected.len() != SELECTION_SIZE {
            self.message = Some(StatusMessage::SelectExactlyFour);
            return SubmitOutcome::Invalid;
        }

        let category_counts: HashMap<String, usize> = self
            .selected
            .iter()
            .filter_map(|text| self.word(text))
            .map(|w| w.category.clone())
            .counts();
        trace!(target: "session", "Submitted {:?}: {:?}", self.selected, category_counts);

        let single_category = match category_counts.keys().exactly_one() {
            Ok(name) => self.puzzle.category(name).cloned(),
            Err(_) => None,
        };
        match single_category {
            Some(category) if category_counts.values().sum::<usize>() == SELECTION_SIZE => {
                let name = category.name.clone();
                self.solved.push(category.as_solved());
                self.selected.clear();
                self.message = Some(StatusMessage::Correct);
                info!(target: "session", "Solved {:?} with {} mistakes", name, self.mistakes);
                self.evaluate_win();
                SubmitOutcome::Correct(name)
            }
            _ => {
                let feedback = self.feedback_for(&category_counts);
                self.mistakes += 1;
                self.selected.clear();
                self.message = Some(feedback);
                info!(
                    target: "session",
                    "Mistake {} of {}: {:?}",
                    self.mistakes,
                    self.max_mistakes,
                    feedback
                );
                self.evaluate_loss();
                SubmitOutcome::Mistake(feedback)
            }
        }
    }

    fn feedback_for(&self, category_counts: &HashMap<String, usize>) -> StatusMessage {
        match self.feedback_rule {
            FeedbackRule::MaxShared => match category_counts.values().max() {
                Some(3) => StatusMessage::OneAway,
                Some(2) => StatusMessage::TryAgain,
                _ => StatusMessage::NotQuite,
            },
            FeedbackRule::DistinctCategories => match category_counts.len() {
                2 => StatusMessage::OneAway,
                _ => StatusMessage::NotQuite,
            },
        }
    }

    fn evaluate_win(&mut self) {
        let solved_by_play = self.solved.iter().filter(|c| !c.revealed).count();
        if solved_by_play == self.puzzle.categories.len() && !self.terminal_event_recorded {
            self.terminal_event_recorded = true;
            self.status = SessionStatus::Won;
            self.message = Some(StatusMessage::Congratulations);
            info!(target: "session", "Puzzle #{} won with {} mistakes", self.puzzle.id, self.mistakes);
            self.event_emitter.emit(&SessionEvent::Win {
                puzzle_id: self.puzzle.id,
                mistakes: self.mistakes,
            });
        }
    }

    fn evaluate_loss(&mut self) {
        if self.mistakes >= self.max_mistakes && !self.revealed && !self.terminal_event_recorded {
            self.terminal_event_recorded = true;
            self.status = SessionStatus::Lost;
            self.message = Some(StatusMessage::GameOver);
            info!(target: "session", "Puzzle #{} lost", self.puzzle.id);
            self.event_emitter.emit(&SessionEvent::Loss {
                puzzle_id: self.puzzle.id,
                mistakes: self.mistakes,
            });
            self.reveal_remaining();
        }
    }

    /// Forfeits the session and discloses every category. Returns false if already over.
    pub fn reveal_solution(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if !self.terminal_event_recorded {
            self.terminal_event_recorded = true;
            self.event_emitter.emit(&SessionEvent::Reveal {
                puzzle_id: self.puzzle.id,
                mistakes: self.mistakes,
            });
        }
        info!(target: "session", "Puzzle #{} revealed", self.puzzle.id);
        self.status = SessionStatus::Revealed;
        self.revealed = true;
        self.message = Some(StatusMessage::SolutionRevealed);
        self.selected.clear();
        self.reveal_remaining();
        true
    }

    fn reveal_remaining(&mut self) {
        let remaining: Vec<Category> = self
            .puzzle
            .categories
            .iter()
            .filter(|c| !self.is_category_solved(&c.name))
            .map(Category::as_revealed)
            .collect();
        self.solved.extend(remaining);
    }

    /// Builds the deferred task that drops a solved category's words from the pool.
    pub fn removal_for(&self, category: &str, due: Instant) -> ScheduledRemoval {
        ScheduledRemoval {
            category: category.to_string(),
            puzzle_id: self.puzzle.id,
            session_id: self.session_id,
            due,
        }
    }

    /// Applies a removal task. Tasks scheduled by another session are discarded.
    pub fn apply_removal(&mut self, task: &ScheduledRemoval) -> bool {
        if task.session_id != self.session_id || task.puzzle_id != self.puzzle.id {
            debug!(
                target: "session",
                "Discarding stale removal of {:?} from session {}",
                task.category,
                task.session_id
            );
            return false;
        }
        self.pool.retain(|w| w.category != task.category);
        self.message = None;
        true
    }
}
