use gtk4 as gtk;
use gtk4::glib;
use libadwaita as adw;

use adw::prelude::*;

use super::state::{Command, Dispatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Outcome {
    GameOver,
    TimeOver,
    LevelComplete,
    GameComplete,
}

impl Outcome {
    fn heading(self) -> &'static str {
        match self {
            Outcome::GameOver => "Game Over",
            Outcome::TimeOver => "Time's Up",
            Outcome::LevelComplete => "Level Complete",
            Outcome::GameComplete => "You Did It!",
        }
    }

    fn body(self) -> &'static str {
        match self {
            Outcome::GameOver => "You ran out of moves.",
            Outcome::TimeOver => "The clock ran out before the board was cleared.",
            Outcome::LevelComplete => "Every pair found. Ready for more cards?",
            Outcome::GameComplete => "You cleared every level.",
        }
    }

    /// Response id and label of the only way forward.
    fn action(self) -> (&'static str, &'static str, Command) {
        match self {
            Outcome::GameOver | Outcome::TimeOver => ("restart", "Restart", Command::Restart),
            Outcome::LevelComplete => ("next", "Next Level", Command::Advance),
            Outcome::GameComplete => ("again", "Play Again", Command::Restart),
        }
    }
}

pub(super) fn show_outcome_dialog(
    window: &adw::ApplicationWindow,
    outcome: Outcome,
    dispatch: Dispatch,
) -> (adw::AlertDialog, glib::SignalHandlerId) {
    let dialog = adw::AlertDialog::new(Some(outcome.heading()), Some(outcome.body()));
    let (response, label, command) = outcome.action();
    dialog.add_response(response, label);
    dialog.set_response_appearance(response, adw::ResponseAppearance::Suggested);
    dialog.set_default_response(Some(response));
    dialog.set_close_response(response);
    let handler = dialog.connect_response(None, move |_, _| {
        dispatch(command);
    });
    dialog.present(Some(window));
    (dialog, handler)
}

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("How to Play"),
        Some(
            "Flip two cards at a time to find matching pairs.\n\
Every pair you compare costs one move.\n\
Normal mode limits your moves and races a clock; Relax mode does neither \
and lets you pick any level.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Memoria")
        .application_icon("io.memoria.Memoria")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("Find the pairs before the moves or the clock run out.")
        .build();
    dialog.add_legal_section("Memoria", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}
