use super::board::{Board, CardId};

const MATCH_SIZE: usize = 2;

/// Result of a single flip request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    /// Nothing changed on the board.
    Rejected,
    /// First card of a pair is face up.
    Flipped(CardId),
    /// Second card is face up and the pair has been compared.
    Compared(Comparison),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comparison {
    pub first: CardId,
    pub second: CardId,
    pub matched: bool,
}

impl Comparison {
    pub fn cards(&self) -> [CardId; 2] {
        [self.first, self.second]
    }
}

/// Tracks the face-up cards that still wait for an outcome.
///
/// A mismatched pair stays pending until [`MatchEngine::clear_mismatch`] runs, so
/// no third card can be turned while the failed pair is still on show.
#[derive(Clone, Debug, Default)]
pub struct MatchEngine {
    pending: Vec<CardId>,
}

impl MatchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    pub fn reset(&mut self) {
        self.pending.clear();
    }

    pub fn reveal(&mut self, board: &mut Board, id: CardId) -> Reveal {
        if self.pending.len() >= MATCH_SIZE {
            return Reveal::Rejected;
        }
        let Some(card) = board.get_mut(id) else {
            return Reveal::Rejected;
        };
        if card.matched || card.revealed {
            return Reveal::Rejected;
        }

        card.revealed = true;
        self.pending.push(id);

        if self.pending.len() < MATCH_SIZE {
            Reveal::Flipped(id)
        } else {
            Reveal::Compared(self.resolve_comparison(board))
        }
    }

    fn resolve_comparison(&mut self, board: &mut Board) -> Comparison {
        let (first, second) = (self.pending[0], self.pending[1]);
        let matched = match (board.get(first), board.get(second)) {
            (Some(a), Some(b)) => a.symbol == b.symbol,
            _ => false,
        };

        for id in [first, second] {
            if let Some(card) = board.get_mut(id) {
                if matched {
                    card.matched = true;
                } else {
                    card.errored = true;
                }
            }
        }
        if matched {
            self.pending.clear();
        }

        Comparison {
            first,
            second,
            matched,
        }
    }

    /// Turns a failed pair back face down. Returns the cards actually cleared;
    /// ids that are no longer errored on this board are skipped.
    pub fn clear_mismatch(&mut self, board: &mut Board, cards: [CardId; 2]) -> Vec<CardId> {
        let mut cleared = Vec::with_capacity(cards.len());
        for id in cards {
            let Some(card) = board.get_mut(id) else {
                continue;
            };
            if !card.errored || card.matched {
                continue;
            }
            card.revealed = false;
            card.errored = false;
            cleared.push(id);
        }
        self.pending.retain(|id| !cleared.contains(id));
        cleared
    }
}
