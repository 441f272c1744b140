use serde::{Deserialize, Serialize};

use super::{Difficulty, Word};

pub const CATEGORY_COUNT: usize = 4;
pub const WORDS_PER_CATEGORY: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
    pub difficulty: Difficulty,
    /// Set only when the category was auto-solved by a loss or a reveal
    #[serde(default)]
    pub revealed: bool,
}

impl Category {
    pub fn new(name: &str, words: [&str; WORDS_PER_CATEGORY], difficulty: Difficulty) -> Self {
        Self {
            name: name.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
            difficulty,
            revealed: false,
        }
    }

    pub fn as_revealed(&self) -> Category {
        Category {
            revealed: true,
            ..self.clone()
        }
    }

    pub fn as_solved(&self) -> Category {
        Category {
            revealed: false,
            ..self.clone()
        }
    }

    pub fn color(&self) -> &'static str {
        self.difficulty.color()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.words.iter().any(|w| w == text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Puzzle {
    pub id: u32,
    pub date: String,
    pub categories: Vec<Category>,
}

impl Puzzle {
    /// Projects every category word into a session word, in category order.
    pub fn all_words(&self) -> Vec<Word> {
        self.categories
            .iter()
            .flat_map(|category| {
                category
                    .words
                    .iter()
                    .map(move |text| Word::new(text, category))
            })
            .collect()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_of(&self, text: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.contains(text))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn sample_puzzle(id: u32) -> Puzzle {
        Puzzle {
            id,
            date: "2024-06-12".to_string(),
            categories: vec![
                Category::new("Fish", ["BASS", "PIKE", "SOLE", "CARP"], Difficulty::Yellow),
                Category::new("Trees", ["OAK", "ASH", "ELM", "FIR"], Difficulty::Green),
                Category::new("Planets", ["MARS", "VENUS", "SATURN", "EARTH"], Difficulty::Blue),
                Category::new("Poker terms", ["FOLD", "CALL", "RAISE", "CHECK"], Difficulty::Purple),
            ],
        }
    }

    #[test]
    fn test_all_words_projects_sixteen_words() {
        let puzzle = sample_puzzle(1);
        let words = puzzle.all_words();
        assert_eq!(words.len(), 16);
        assert_eq!(words[0].text, "BASS");
        assert_eq!(words[0].category, "Fish");
        assert_eq!(words[15].color, Difficulty::Purple.color());
    }

    #[test]
    fn test_category_of_finds_owner() {
        let puzzle = sample_puzzle(1);
        assert_eq!(puzzle.category_of("ELM").map(|c| c.name.as_str()), Some("Trees"));
        assert!(puzzle.category_of("PLUTO").is_none());
    }

    #[test]
    fn test_revealed_flag_defaults_to_false() {
        let json = r##"{"name":"Trees","words":["OAK","ASH","ELM","FIR"],"difficulty":1,"color":"#a0c35a"}"##;
        let category: Category = serde_json::from_str(json).unwrap();
        assert!(!category.revealed);
        assert_eq!(category.difficulty, Difficulty::Green);
    }
}
