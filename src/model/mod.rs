mod difficulty;
mod game_command;
pub mod game_state_snapshot;
mod game_stats;
mod puzzle;
mod puzzle_history;
mod session_event;
mod status_message;
mod word;

pub use difficulty::Difficulty;
pub use game_command::GameCommand;
pub use game_state_snapshot::SessionSnapshot;
pub use game_stats::StatsRecord;
pub use puzzle::{Category, Puzzle, CATEGORY_COUNT, WORDS_PER_CATEGORY};
pub use puzzle_history::PuzzleHistoryRecord;
pub use session_event::SessionEvent;
pub use status_message::StatusMessage;
pub use word::Word;

#[cfg(test)]
pub use puzzle::tests::sample_puzzle;
