use std::fmt;

use serde::{Deserialize, Serialize};

/// Card face. Two cards match when their symbols are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(glyph: impl Into<String>) -> Self {
        Symbol(glyph.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(glyph: &str) -> Self {
        Symbol(glyph.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a card on the current board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

impl CardId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub symbol: Symbol,
    pub revealed: bool,
    pub matched: bool,
    /// Set between a failed comparison and the deferred clear.
    pub errored: bool,
}

impl Card {
    pub fn hidden(id: CardId, symbol: Symbol) -> Self {
        Card {
            id,
            symbol,
            revealed: false,
            matched: false,
            errored: false,
        }
    }

    /// Face up and still waiting for a comparison outcome.
    pub fn is_unresolved(&self) -> bool {
        self.revealed && !self.matched
    }
}

/// Cards of the level in play, in deal order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(idx, symbol)| Card::hidden(CardId(idx), symbol))
            .collect();
        Board { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    pub fn unresolved_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_unresolved()).count()
    }

    /// An empty board is never complete; there is nothing to have won.
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.matched)
    }

    /// Ids of every card carrying `symbol`, in board order.
    pub fn positions_of(&self, symbol: &Symbol) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|card| &card.symbol == symbol)
            .map(|card| card.id)
            .collect()
    }
}
