//! GTK4 / libadwaita front-end.

mod app;
mod board;
mod dialogs;
mod hud;
mod logging;
mod scheduler;
mod state;

pub use app::run;
pub use scheduler::GlibScheduler;
pub use state::{Command, GtkView};
