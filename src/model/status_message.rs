use std::fmt::Display;

/// Transient user-facing message attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    SelectExactlyFour,
    Correct,
    OneAway,
    TryAgain,
    NotQuite,
    Congratulations,
    GameOver,
    SolutionRevealed,
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StatusMessage::SelectExactlyFour => "Please select exactly 4 words",
            StatusMessage::Correct => "Correct! 🎊",
            StatusMessage::OneAway => "One away...",
            StatusMessage::TryAgain => "Try again!",
            StatusMessage::NotQuite => "Not quite. Keep trying!",
            StatusMessage::Congratulations => "🎉 Congratulations! You won!",
            StatusMessage::GameOver => "Game Over! Better luck next time.",
            StatusMessage::SolutionRevealed => "Solution revealed",
        };
        write!(f, "{}", text)
    }
}
