use super::{Category, Difficulty};

/// A word as it sits in a session's pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub color: &'static str,
}

impl Word {
    pub fn new(text: &str, category: &Category) -> Self {
        Self {
            text: text.to_string(),
            category: category.name.clone(),
            difficulty: category.difficulty,
            color: category.difficulty.color(),
        }
    }
}
