//! Memoria core crate.
//!
//! The [`game`] module holds the headless game: level catalog, deck shuffling,
//! pair matching and the session state machine. The GTK front-end in `ui` is
//! compiled with the `gui` feature and only talks to the core through the
//! [`game::View`] and [`game::Scheduler`] seams.

pub mod game;

#[cfg(feature = "gui")]
pub mod ui;
