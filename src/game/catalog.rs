use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::Symbol;

/// Symbol groups of the reference catalog. Level N plays groups `0..=N`.
const REFERENCE_GROUPS: [&[&str]; 5] = [
    &["🦄", "🍦"],
    &["🌈", "👽"],
    &["👾", "🤖", "👹", "👺"],
    &["🤡", "💩", "🎃", "🙀"],
    &["☠️", "👻", "😽", "😼"],
];

const REFERENCE_MOVE_LIMITS: [u32; 5] = [3, 8, 12, 25, 60];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("level {index} is out of range (catalog has {count} levels)")]
    OutOfRange { index: usize, count: usize },
    #[error("level catalog is empty")]
    Empty,
    #[error("level {index} has no symbols")]
    EmptyLevel { index: usize },
    #[error("level {index} allows zero moves")]
    ZeroMoveLimit { index: usize },
    #[error("level {index} repeats symbol {symbol}")]
    DuplicateSymbol { index: usize, symbol: Symbol },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub symbols: Vec<Symbol>,
    pub max_moves: u32,
}

impl LevelDefinition {
    pub fn card_count(&self) -> usize {
        self.symbols.len() * 2
    }
}

/// Ordered, validated list of levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            if level.symbols.is_empty() {
                return Err(CatalogError::EmptyLevel { index });
            }
            if level.max_moves == 0 {
                return Err(CatalogError::ZeroMoveLimit { index });
            }
            let mut seen = HashSet::with_capacity(level.symbols.len());
            for symbol in &level.symbols {
                if !seen.insert(symbol) {
                    return Err(CatalogError::DuplicateSymbol {
                        index,
                        symbol: symbol.clone(),
                    });
                }
            }
        }
        Ok(LevelCatalog { levels })
    }

    /// The five built-in levels with cumulative symbol sets.
    pub fn reference() -> Self {
        let levels = reference_levels();
        LevelCatalog { levels }
    }

    pub fn get_level(&self, index: usize) -> Result<&LevelDefinition, CatalogError> {
        self.levels.get(index).ok_or(CatalogError::OutOfRange {
            index,
            count: self.levels.len(),
        })
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.levels.len()
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }
}

pub(crate) fn reference_levels() -> Vec<LevelDefinition> {
    let mut symbols: Vec<Symbol> = Vec::new();
    REFERENCE_GROUPS
        .iter()
        .zip(REFERENCE_MOVE_LIMITS)
        .map(|(group, max_moves)| {
            symbols.extend(group.iter().map(|glyph| Symbol::from(*glyph)));
            LevelDefinition {
                symbols: symbols.clone(),
                max_moves,
            }
        })
        .collect()
}
