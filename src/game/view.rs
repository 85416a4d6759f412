use super::board::{Card, CardId};

/// Render notifications sent by the session. Every method defaults to doing
/// nothing, so a view only implements what it draws.
pub trait View {
    /// A new game was started; `relax` hides the clock.
    fn game_started(&mut self, _relax: bool) {}
    fn board_dealt(&mut self, _cards: &[Card]) {}
    fn card_revealed(&mut self, _id: CardId) {}
    fn cards_matched(&mut self, _ids: [CardId; 2]) {}
    fn cards_mismatched(&mut self, _ids: [CardId; 2]) {}
    /// Cards of a failed pair turned face down again.
    fn cards_cleared(&mut self, _ids: &[CardId]) {}
    fn move_count_changed(&mut self, _count: u32, _max: u32) {}
    fn level_changed(&mut self, _index: usize) {}
    fn timer_changed(&mut self, _minutes: u32, _seconds: u32) {}
    fn game_over(&mut self) {}
    fn time_over(&mut self) {}
    fn level_complete(&mut self, _is_final: bool) {}
}

/// View that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullView;

impl View for NullView {}
