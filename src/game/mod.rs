pub mod catalog;
pub mod controller;
pub mod history_tracker;
pub mod removal_scheduler;
pub mod session_engine;
pub mod session_persistence;
pub mod settings;
pub mod shuffle;
pub mod stats_tracker;

pub use catalog::{CatalogError, PuzzleCatalog, PuzzleList};
pub use controller::GameController;
pub use history_tracker::HistoryTracker;
pub use removal_scheduler::{RemovalScheduler, ScheduledRemoval};
pub use session_engine::{SessionEngine, SessionStatus, SubmitOutcome, SELECTION_SIZE};
pub use session_persistence::SessionPersistence;
pub use settings::{FeedbackRule, Settings};
pub use shuffle::shuffled;
pub use stats_tracker::StatsTracker;
