use serde::{Deserialize, Serialize};

/// Difficulty rank of a category; each rank has a fixed display color.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    #[default]
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![
            Difficulty::Yellow,
            Difficulty::Green,
            Difficulty::Blue,
            Difficulty::Purple,
        ]
    }

    pub fn index(&self) -> u8 {
        match self {
            Difficulty::Yellow => 0,
            Difficulty::Green => 1,
            Difficulty::Blue => 2,
            Difficulty::Purple => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Difficulty> {
        match index {
            0 => Some(Difficulty::Yellow),
            1 => Some(Difficulty::Green),
            2 => Some(Difficulty::Blue),
            3 => Some(Difficulty::Purple),
            _ => None,
        }
    }

    /// Hex color used when the category is shown as solved
    pub fn color(&self) -> &'static str {
        match self {
            Difficulty::Yellow => "#f9df6d",
            Difficulty::Green => "#a0c35a",
            Difficulty::Blue => "#b0c4ef",
            Difficulty::Purple => "#ba81c5",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Difficulty::from_index(value)
            .ok_or_else(|| format!("difficulty rank {} is not in 0..=3", value))
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_round_trips_through_json() {
        let parsed: Difficulty = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Difficulty::Blue);
        assert_eq!(serde_json::to_string(&Difficulty::Purple).unwrap(), "3");
    }

    #[test]
    fn test_out_of_range_rank_is_rejected() {
        assert!(serde_json::from_str::<Difficulty>("4").is_err());
    }

    #[test]
    fn test_colors_are_distinct() {
        let colors: std::collections::HashSet<_> =
            Difficulty::all().iter().map(|d| d.color()).collect();
        assert_eq!(colors.len(), 4);
    }
}
