use serde::{Deserialize, Serialize};

use super::SessionEvent;

/// Lifetime counters over every terminal session.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsRecord {
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub games_revealed: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub total_mistakes: u32,
}

impl StatsRecord {
    /// Folds one session event into a new record. Non-terminal events leave it unchanged.
    pub fn apply(&self, event: &SessionEvent) -> StatsRecord {
        let mut next = self.clone();
        match *event {
            SessionEvent::Started { .. } => return next,
            SessionEvent::Win { mistakes, .. } => {
                next.games_won += 1;
                next.current_streak += 1;
                next.max_streak = next.max_streak.max(next.current_streak);
                next.total_mistakes += mistakes;
            }
            SessionEvent::Loss { mistakes, .. } => {
                next.games_lost += 1;
                next.current_streak = 0;
                next.total_mistakes += mistakes;
            }
            SessionEvent::Reveal { mistakes, .. } => {
                next.games_revealed += 1;
                next.current_streak = 0;
                next.total_mistakes += mistakes;
            }
        }
        next.games_played += 1;
        next
    }

    /// Percentage of played games that were won, rounded to the nearest integer
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        (100.0 * self.games_won as f64 / self.games_played as f64).round() as u32
    }

    /// Mean mistakes per game, rounded to one decimal place
    pub fn average_mistakes(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let average = self.total_mistakes as f64 / self.games_played as f64;
        (average * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(mistakes: u32) -> SessionEvent {
        SessionEvent::Win {
            puzzle_id: 1,
            mistakes,
        }
    }

    fn loss(mistakes: u32) -> SessionEvent {
        SessionEvent::Loss {
            puzzle_id: 1,
            mistakes,
        }
    }

    #[test]
    fn test_win_loss_win_sequence() {
        let stats = StatsRecord::default()
            .apply(&win(1))
            .apply(&loss(3))
            .apply(&win(0));

        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.games_lost, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.total_mistakes, 4);
        assert_eq!(stats.win_rate(), 67);
        assert_eq!(stats.average_mistakes(), 1.3);
    }

    #[test]
    fn test_reveal_breaks_streak() {
        let stats = StatsRecord::default()
            .apply(&win(0))
            .apply(&win(2))
            .apply(&SessionEvent::Reveal {
                puzzle_id: 4,
                mistakes: 1,
            });

        assert_eq!(stats.games_revealed, 1);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 2);
        assert_eq!(stats.games_played, 3);
    }

    #[test]
    fn test_started_event_is_ignored() {
        let stats = StatsRecord::default().apply(&SessionEvent::Started {
            puzzle_id: 1,
            resumed: false,
            solved: 0,
            mistakes: 0,
        });
        assert_eq!(stats, StatsRecord::default());
    }

    #[test]
    fn test_derived_metrics_on_empty_record() {
        let stats = StatsRecord::default();
        assert_eq!(stats.win_rate(), 0);
        assert_eq!(stats.average_mistakes(), 0.0);
    }

    #[test]
    fn test_partial_record_merges_over_defaults() {
        let stats: StatsRecord = serde_json::from_str(r#"{"gamesPlayed":5,"gamesWon":2}"#).unwrap();
        assert_eq!(stats.games_played, 5);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.games_revealed, 0);
    }
}
