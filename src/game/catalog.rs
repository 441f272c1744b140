use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::model::{Puzzle, CATEGORY_COUNT, WORDS_PER_CATEGORY};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read puzzle file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse puzzle file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("puzzle file contains no puzzles")]
    Empty,
    #[error("puzzle {id} has {found} categories, expected {expected}", expected = CATEGORY_COUNT)]
    CategoryCount { id: u32, found: usize },
    #[error("category '{category}' of puzzle {id} has {found} words, expected {expected}", expected = WORDS_PER_CATEGORY)]
    WordCount {
        id: u32,
        category: String,
        found: usize,
    },
    #[error("puzzle {id} repeats the word '{word}'")]
    DuplicateWord { id: u32, word: String },
    #[error("puzzle {id} repeats the category '{category}'")]
    DuplicateCategory { id: u32, category: String },
    #[error("puzzle id {0} appears more than once")]
    DuplicateId(u32),
}

/// Ordered, read-only collection of puzzles.
pub trait PuzzleCatalog {
    /// `index` must be in `0..count()`.
    fn get(&self, index: usize) -> &Puzzle;
    fn count(&self) -> usize;
}

/// Catalog backed by a validated vector of puzzles.
#[derive(Debug, Clone)]
pub struct PuzzleList {
    puzzles: Vec<Puzzle>,
}

impl PuzzleList {
    pub fn new(puzzles: Vec<Puzzle>) -> Result<Self, CatalogError> {
        if puzzles.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut ids = HashSet::new();
        for puzzle in &puzzles {
            validate(puzzle)?;
            if !ids.insert(puzzle.id) {
                return Err(CatalogError::DuplicateId(puzzle.id));
            }
        }
        Ok(Self { puzzles })
    }

    pub fn from_json(contents: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let catalog = Self::from_json(&fs::read_to_string(path)?)?;
        info!(target: "catalog", "Loaded {} puzzles from {:?}", catalog.count(), path);
        Ok(catalog)
    }
}

impl PuzzleCatalog for PuzzleList {
    fn get(&self, index: usize) -> &Puzzle {
        &self.puzzles[index]
    }

    fn count(&self) -> usize {
        self.puzzles.len()
    }
}

fn validate(puzzle: &Puzzle) -> Result<(), CatalogError> {
    if puzzle.categories.len() != CATEGORY_COUNT {
        return Err(CatalogError::CategoryCount {
            id: puzzle.id,
            found: puzzle.categories.len(),
        });
    }
    let mut names = HashSet::new();
    let mut words = HashSet::new();
    for category in &puzzle.categories {
        if !names.insert(category.name.as_str()) {
            return Err(CatalogError::DuplicateCategory {
                id: puzzle.id,
                category: category.name.clone(),
            });
        }
        if category.words.len() != WORDS_PER_CATEGORY {
            return Err(CatalogError::WordCount {
                id: puzzle.id,
                category: category.name.clone(),
                found: category.words.len(),
            });
        }
        for word in &category.words {
            if !words.insert(word.as_str()) {
                return Err(CatalogError::DuplicateWord {
                    id: puzzle.id,
                    word: word.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_puzzle;

    #[test]
    fn test_accepts_well_formed_puzzles() {
        let catalog = PuzzleList::new(vec![sample_puzzle(1), sample_puzzle(2)]).unwrap();
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.get(1).id, 2);
    }

    #[test]
    fn test_rejects_duplicate_words() {
        let mut puzzle = sample_puzzle(1);
        puzzle.categories[1].words[0] = "BASS".to_string();
        assert!(matches!(
            PuzzleList::new(vec![puzzle]),
            Err(CatalogError::DuplicateWord { id: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_short_category() {
        let mut puzzle = sample_puzzle(5);
        puzzle.categories[2].words.pop();
        assert!(matches!(
            PuzzleList::new(vec![puzzle]),
            Err(CatalogError::WordCount { found: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_missing_category_and_duplicate_ids() {
        let mut puzzle = sample_puzzle(5);
        puzzle.categories.pop();
        assert!(matches!(
            PuzzleList::new(vec![puzzle]),
            Err(CatalogError::CategoryCount { found: 3, .. })
        ));
        assert!(matches!(
            PuzzleList::new(vec![sample_puzzle(5), sample_puzzle(5)]),
            Err(CatalogError::DuplicateId(5))
        ));
        assert!(matches!(PuzzleList::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_parses_catalog_json() {
        let json = serde_json::to_string(&vec![sample_puzzle(9)]).unwrap();
        let catalog = PuzzleList::from_json(&json).unwrap();
        assert_eq!(catalog.get(0), &sample_puzzle(9));
    }
}
