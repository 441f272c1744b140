use std::str::FromStr;

/// Player actions accepted by the game controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Select(String),
    Submit,
    Shuffle,
    ClearSelection,
    Reveal,
    Previous,
    Next,
    Random,
    /// 1-based puzzle number
    JumpTo(usize),
    Reset,
    ResetStats,
    ResetHistory,
}

impl FromStr for GameCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().map(str::trim).unwrap_or_default();
        match (verb.as_str(), arg) {
            ("select" | "s", word) if !word.is_empty() => Ok(GameCommand::Select(word.to_uppercase())),
            ("submit" | "go", "") => Ok(GameCommand::Submit),
            ("shuffle", "") => Ok(GameCommand::Shuffle),
            ("clear", "") => Ok(GameCommand::ClearSelection),
            ("reveal", "") => Ok(GameCommand::Reveal),
            ("prev" | "previous", "") => Ok(GameCommand::Previous),
            ("next", "") => Ok(GameCommand::Next),
            ("random", "") => Ok(GameCommand::Random),
            ("jump", number) => number
                .parse::<usize>()
                .map(GameCommand::JumpTo)
                .map_err(|_| format!("not a puzzle number: {:?}", number)),
            ("reset", "") => Ok(GameCommand::Reset),
            ("reset-stats", "") => Ok(GameCommand::ResetStats),
            ("reset-history", "") => Ok(GameCommand::ResetHistory),
            _ => Err(format!("unknown command: {:?}", line.trim())),
        }
    }
}
