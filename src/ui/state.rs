use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;

use super::board::{build_board_grid, grid_columns};
use super::dialogs::{Outcome, show_outcome_dialog};
use super::hud;
use crate::game::{Card, CardId, View};

/// User intent forwarded from widgets to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start { relax: bool },
    Flip(CardId),
    Restart,
    Advance,
    SelectLevel(usize),
}

pub type Dispatch = Rc<dyn Fn(Command)>;

/// What a card button draws.
#[derive(Clone, Debug, Default)]
pub struct CardFace {
    pub symbol: String,
    pub shown: bool,
}

pub(super) struct Widgets {
    pub window: adw::ApplicationWindow,
    pub view_stack: gtk::Stack,
    pub board_container: gtk::Box,
    pub level_label: gtk::Label,
    pub moves_label: gtk::Label,
    pub timer_label: gtk::Label,
    pub level_menu_button: gtk::MenuButton,
    pub restart_button: gtk::Button,
}

/// Widget side of the game. Holds no game state beyond what it renders.
#[derive(Default)]
pub struct GtkView {
    widgets: Option<Widgets>,
    faces: Rc<RefCell<Vec<CardFace>>>,
    buttons: Vec<gtk::Button>,
    dispatch: Option<Dispatch>,
    outcome_dialog: Rc<RefCell<OutcomeSlot<OpenOutcome>>>,
}

/// An outcome dialog on screen and the handler that turns its answer into a
/// command.
struct OpenOutcome {
    dialog: adw::AlertDialog,
    response_handler: glib::SignalHandlerId,
}

impl PartialEq<adw::AlertDialog> for OpenOutcome {
    fn eq(&self, other: &adw::AlertDialog) -> bool {
        &self.dialog == other
    }
}

/// At most one outcome dialog stays answerable.
struct OutcomeSlot<D> {
    open: Option<D>,
}

impl<D> Default for OutcomeSlot<D> {
    fn default() -> Self {
        OutcomeSlot { open: None }
    }
}

impl<D> OutcomeSlot<D> {
    /// Makes `next` the open dialog and returns the one it replaces.
    fn present(&mut self, next: D) -> Option<D> {
        self.open.replace(next)
    }

    /// Forgets `closed` if it is still the open dialog.
    fn closed<T>(&mut self, closed: &T)
    where
        D: PartialEq<T>,
    {
        if self.open.as_ref().is_some_and(|open| open == closed) {
            self.open = None;
        }
    }
}

impl GtkView {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn attach(&mut self, widgets: Widgets, dispatch: Dispatch) {
        self.widgets = Some(widgets);
        self.dispatch = Some(dispatch);
    }

    fn button(&self, id: CardId) -> Option<&gtk::Button> {
        self.buttons.get(id.index())
    }

    fn set_shown(&self, id: CardId, shown: bool) {
        if let Some(face) = self.faces.borrow_mut().get_mut(id.index()) {
            face.shown = shown;
        }
    }

    fn present_outcome(&mut self, outcome: Outcome) {
        let (Some(widgets), Some(dispatch)) = (&self.widgets, &self.dispatch) else {
            return;
        };
        let (dialog, response_handler) =
            show_outcome_dialog(&widgets.window, outcome, dispatch.clone());

        let slot = Rc::downgrade(&self.outcome_dialog);
        dialog.connect_closed(move |closed| {
            if let Some(slot) = slot.upgrade() {
                slot.borrow_mut().closed(closed);
            }
        });

        // A late win replaces the game over; the stale answer must not dispatch.
        let stale = self.outcome_dialog.borrow_mut().present(OpenOutcome {
            dialog,
            response_handler,
        });
        if let Some(stale) = stale {
            stale.dialog.disconnect(stale.response_handler);
            stale.dialog.force_close();
        }
    }
}

fn redraw_button_child(button: &gtk::Button) {
    if let Some(child) = button.child() {
        child.queue_draw();
    }
}

impl View for GtkView {
    fn game_started(&mut self, relax: bool) {
        let Some(widgets) = &self.widgets else {
            return;
        };
        widgets.timer_label.set_visible(!relax);
        // Jumping between levels is a relax-mode convenience.
        widgets.level_menu_button.set_visible(relax);
        widgets.restart_button.set_visible(true);
        widgets
            .view_stack
            .set_transition_type(gtk::StackTransitionType::SlideLeft);
        widgets.view_stack.set_visible_child_name("game");
    }

    fn board_dealt(&mut self, cards: &[Card]) {
        {
            let mut faces = self.faces.borrow_mut();
            faces.clear();
            faces.extend(cards.iter().map(|card| CardFace {
                symbol: card.symbol.to_string(),
                shown: card.revealed || card.matched,
            }));
        }
        let (Some(widgets), Some(dispatch)) = (&self.widgets, &self.dispatch) else {
            return;
        };

        let container = &widgets.board_container;
        while let Some(child) = container.first_child() {
            container.remove(&child);
        }
        let cols = grid_columns(cards.len());
        let (grid, buttons) = build_board_grid(&self.faces, cols, dispatch.clone());
        let rows = cards.len().div_ceil(cols.max(1)).max(1);
        let frame = gtk::AspectFrame::new(0.5, 0.5, cols as f32 / rows as f32, false);
        frame.set_halign(gtk::Align::Fill);
        frame.set_valign(gtk::Align::Fill);
        frame.set_hexpand(true);
        frame.set_vexpand(true);
        frame.set_child(Some(&grid));
        container.append(&frame);
        self.buttons = buttons;
    }

    fn card_revealed(&mut self, id: CardId) {
        self.set_shown(id, true);
        if let Some(button) = self.button(id) {
            button.add_css_class("revealed");
            redraw_button_child(button);
        }
    }

    fn cards_matched(&mut self, ids: [CardId; 2]) {
        for id in ids {
            if let Some(button) = self.button(id) {
                button.add_css_class("matched");
            }
        }
    }

    fn cards_mismatched(&mut self, ids: [CardId; 2]) {
        for id in ids {
            if let Some(button) = self.button(id) {
                button.add_css_class("errored");
            }
        }
        if let Some(button) = self.button(ids[1]) {
            button.error_bell();
        }
    }

    fn cards_cleared(&mut self, ids: &[CardId]) {
        for &id in ids {
            self.set_shown(id, false);
            if let Some(button) = self.button(id) {
                button.remove_css_class("revealed");
                button.remove_css_class("errored");
                redraw_button_child(button);
            }
        }
    }

    fn move_count_changed(&mut self, count: u32, max: u32) {
        if let Some(widgets) = &self.widgets {
            widgets.moves_label.set_text(&hud::moves_text(count, max));
        }
    }

    fn level_changed(&mut self, index: usize) {
        if let Some(widgets) = &self.widgets {
            widgets.level_label.set_text(&hud::level_text(index));
            widgets.level_menu_button.popdown();
        }
    }

    fn timer_changed(&mut self, minutes: u32, seconds: u32) {
        if let Some(widgets) = &self.widgets {
            widgets
                .timer_label
                .set_text(&hud::clock_text(minutes, seconds));
        }
    }

    fn game_over(&mut self) {
        self.present_outcome(Outcome::GameOver);
    }

    fn time_over(&mut self) {
        self.present_outcome(Outcome::TimeOver);
    }

    fn level_complete(&mut self, is_final: bool) {
        self.present_outcome(if is_final {
            Outcome::GameComplete
        } else {
            Outcome::LevelComplete
        });
    }
}
