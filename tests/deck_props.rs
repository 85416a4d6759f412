// Property tests for the deck shuffler.

use std::collections::{BTreeMap, HashSet};

use memoria::game::{LevelDefinition, Symbol, deal, shuffle};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn tally(symbols: &[Symbol]) -> BTreeMap<Symbol, usize> {
    let mut out = BTreeMap::new();
    for symbol in symbols {
        *out.entry(symbol.clone()).or_insert(0) += 1;
    }
    out
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation_of_the_doubled_input(
        glyphs in proptest::collection::hash_set("[a-z]{1,3}", 1..24),
        seed in any::<u64>(),
    ) {
        let symbols: Vec<Symbol> = glyphs.iter().map(|g| Symbol::new(g.as_str())).collect();
        let mut doubled = symbols.clone();
        doubled.extend(symbols.iter().cloned());

        let mut rng = StdRng::seed_from_u64(seed);
        let deck = shuffle(&symbols, &mut rng);

        prop_assert_eq!(deck.len(), 2 * symbols.len());
        prop_assert_eq!(tally(&deck), tally(&doubled));
    }

    #[test]
    fn dealt_boards_hold_every_symbol_exactly_twice(
        glyphs in proptest::collection::hash_set("[A-Z]{2}", 1..16),
        max_moves in 1u32..100,
        seed in any::<u64>(),
    ) {
        let level = LevelDefinition {
            symbols: glyphs.iter().map(|g| Symbol::new(g.as_str())).collect(),
            max_moves,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let board = deal(&level, &mut rng);

        prop_assert_eq!(board.len(), level.card_count());
        let distinct: HashSet<&Symbol> = board.cards().iter().map(|c| &c.symbol).collect();
        prop_assert_eq!(distinct.len(), level.symbols.len());
        for symbol in &level.symbols {
            prop_assert_eq!(board.positions_of(symbol).len(), 2);
        }
        for (idx, card) in board.cards().iter().enumerate() {
            prop_assert_eq!(card.id.index(), idx);
        }
    }
}
