//! Shared helpers for session integration tests.
#![allow(dead_code)]

use std::time::Duration;

use memoria::game::{Card, CardId, GameConfig, GameSession, ManualScheduler, Symbol, View};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seen {
    GameStarted(bool),
    Dealt(usize),
    Revealed(CardId),
    Matched([CardId; 2]),
    Mismatched([CardId; 2]),
    Cleared(Vec<CardId>),
    Moves(u32, u32),
    Level(usize),
    Timer(u32, u32),
    GameOver,
    TimeOver,
    LevelComplete(bool),
}

/// View that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub seen: Vec<Seen>,
}

impl RecordingView {
    pub fn count(&self, wanted: &Seen) -> usize {
        self.seen.iter().filter(|seen| *seen == wanted).count()
    }

    pub fn last(&self) -> Option<&Seen> {
        self.seen.last()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl View for RecordingView {
    fn game_started(&mut self, relax: bool) {
        self.seen.push(Seen::GameStarted(relax));
    }
    fn board_dealt(&mut self, cards: &[Card]) {
        self.seen.push(Seen::Dealt(cards.len()));
    }
    fn card_revealed(&mut self, id: CardId) {
        self.seen.push(Seen::Revealed(id));
    }
    fn cards_matched(&mut self, ids: [CardId; 2]) {
        self.seen.push(Seen::Matched(ids));
    }
    fn cards_mismatched(&mut self, ids: [CardId; 2]) {
        self.seen.push(Seen::Mismatched(ids));
    }
    fn cards_cleared(&mut self, ids: &[CardId]) {
        self.seen.push(Seen::Cleared(ids.to_vec()));
    }
    fn move_count_changed(&mut self, count: u32, max: u32) {
        self.seen.push(Seen::Moves(count, max));
    }
    fn level_changed(&mut self, index: usize) {
        self.seen.push(Seen::Level(index));
    }
    fn timer_changed(&mut self, minutes: u32, seconds: u32) {
        self.seen.push(Seen::Timer(minutes, seconds));
    }
    fn game_over(&mut self) {
        self.seen.push(Seen::GameOver);
    }
    fn time_over(&mut self) {
        self.seen.push(Seen::TimeOver);
    }
    fn level_complete(&mut self, is_final: bool) {
        self.seen.push(Seen::LevelComplete(is_final));
    }
}

pub type TestSession = GameSession<RecordingView, ManualScheduler>;

pub const DELAY: Duration = Duration::from_secs(1);

pub fn new_session(seed: u64) -> TestSession {
    GameSession::new(RecordingView::default(), ManualScheduler::new()).with_seed(seed)
}

pub fn session_from_config(config: &GameConfig, seed: u64) -> TestSession {
    GameSession::from_config(config, RecordingView::default(), ManualScheduler::new())
        .unwrap()
        .with_seed(seed)
}

/// Both positions of `glyph` on the current board.
pub fn pair(session: &TestSession, glyph: &str) -> [CardId; 2] {
    let ids = session.board().positions_of(&Symbol::from(glyph));
    assert_eq!(ids.len(), 2, "{glyph} should be dealt exactly twice");
    [ids[0], ids[1]]
}

pub fn flip_pair(session: &mut TestSession, ids: [CardId; 2]) {
    session.flip_card(ids[0]);
    session.flip_card(ids[1]);
}

/// Matches every pair of the current level, in catalog order.
pub fn clear_board(session: &mut TestSession) {
    let symbols = session.current_level().symbols.clone();
    for symbol in symbols {
        let ids = session.board().positions_of(&symbol);
        flip_pair(session, [ids[0], ids[1]]);
    }
}

/// Flips one 🦄 against one 🍦 on level 0 and waits for them to turn back.
pub fn miss_once(session: &mut TestSession) {
    let unicorn = pair(session, "🦄");
    let ice_cream = pair(session, "🍦");
    flip_pair(session, [unicorn[0], ice_cream[0]]);
    session.advance(DELAY);
}
