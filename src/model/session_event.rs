/// Events emitted by the session engine.
///
/// Exactly one of `Win`, `Loss` or `Reveal` is emitted per session instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started {
        puzzle_id: u32,
        resumed: bool,
        solved: usize,
        mistakes: u32,
    },
    Win {
        puzzle_id: u32,
        mistakes: u32,
    },
    Loss {
        puzzle_id: u32,
        mistakes: u32,
    },
    Reveal {
        puzzle_id: u32,
        mistakes: u32,
    },
}

impl SessionEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionEvent::Started { .. })
    }

    pub fn puzzle_id(&self) -> u32 {
        match self {
            SessionEvent::Started { puzzle_id, .. }
            | SessionEvent::Win { puzzle_id, .. }
            | SessionEvent::Loss { puzzle_id, .. }
            | SessionEvent::Reveal { puzzle_id, .. } => *puzzle_id,
        }
    }
}
