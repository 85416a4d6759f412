use rand::Rng;
use rand::seq::SliceRandom;

use super::board::{Board, Symbol};
use super::catalog::LevelDefinition;

/// Every symbol twice, uniformly permuted. `symbols` is left untouched.
pub fn shuffle<R: Rng + ?Sized>(symbols: &[Symbol], rng: &mut R) -> Vec<Symbol> {
    let mut deck = Vec::with_capacity(symbols.len() * 2);
    deck.extend_from_slice(symbols);
    deck.extend_from_slice(symbols);
    deck.shuffle(rng);
    deck
}

/// Fresh face-down board for `level`.
pub fn deal<R: Rng + ?Sized>(level: &LevelDefinition, rng: &mut R) -> Board {
    Board::from_symbols(shuffle(&level.symbols, rng))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::catalog::LevelCatalog;

    fn symbols(glyphs: &[&str]) -> Vec<Symbol> {
        glyphs.iter().map(|g| Symbol::from(*g)).collect()
    }

    fn counts(deck: &[Symbol]) -> HashMap<Symbol, usize> {
        let mut out = HashMap::new();
        for symbol in deck {
            *out.entry(symbol.clone()).or_insert(0) += 1;
        }
        out
    }

    #[test]
    fn every_level_deals_each_symbol_twice() {
        let mut rng = StdRng::seed_from_u64(7);
        for level in LevelCatalog::reference().levels() {
            let deck = shuffle(&level.symbols, &mut rng);
            assert_eq!(deck.len(), 2 * level.symbols.len());
            let seen = counts(&deck);
            assert_eq!(seen.len(), level.symbols.len());
            assert!(seen.values().all(|&n| n == 2));
        }
    }

    #[test]
    fn input_is_not_modified() {
        let input = symbols(&["a", "b", "c"]);
        let before = input.clone();
        let mut rng = StdRng::seed_from_u64(1);
        let _ = shuffle(&input, &mut rng);
        assert_eq!(input, before);
    }

    #[test]
    fn positions_are_uniformly_distributed() {
        let input = symbols(&["a", "b", "c", "d"]);
        let target = Symbol::from("a");
        let trials = 20_000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut per_position = [0usize; 8];
        let mut first_slot: HashMap<Symbol, usize> = HashMap::new();

        for _ in 0..trials {
            let deck = shuffle(&input, &mut rng);
            for (pos, symbol) in deck.iter().enumerate() {
                if *symbol == target {
                    per_position[pos] += 1;
                }
            }
            *first_slot.entry(deck[0].clone()).or_insert(0) += 1;
        }

        // Two copies over eight slots: each slot holds `a` a quarter of the time.
        let expected = trials / 4;
        for (pos, &n) in per_position.iter().enumerate() {
            assert!(
                n.abs_diff(expected) < expected / 10,
                "slot {pos} held the target {n} times, expected about {expected}"
            );
        }
        for symbol in &input {
            let n = first_slot.get(symbol).copied().unwrap_or(0);
            assert!(
                n.abs_diff(expected) < expected / 10,
                "{symbol} opened the deck {n} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn output_is_rarely_the_unshuffled_order() {
        let input = symbols(&["a", "b", "c", "d"]);
        let mut doubled = input.clone();
        doubled.extend(input.iter().cloned());
        let mut rng = StdRng::seed_from_u64(99);
        let unchanged = (0..1_000)
            .filter(|_| shuffle(&input, &mut rng) == doubled)
            .count();
        assert!(unchanged < 10, "{unchanged} of 1000 shuffles kept input order");
    }

    #[test]
    fn deal_produces_hidden_cards() {
        let catalog = LevelCatalog::reference();
        let level = catalog.get_level(1).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let board = deal(level, &mut rng);
        assert_eq!(board.len(), 8);
        assert!(board.cards().iter().all(|c| !c.revealed && !c.matched && !c.errored));
    }
}
