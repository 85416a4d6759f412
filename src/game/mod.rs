//! Headless game core.

mod board;
mod catalog;
mod config;
mod deck;
mod engine;
mod schedule;
mod session;
mod timer;
mod view;

pub use board::{Board, Card, CardId, Symbol};
pub use catalog::{CatalogError, LevelCatalog, LevelDefinition};
pub use config::{ConfigError, GameConfig};
pub use deck::{deal, shuffle};
pub use engine::{Comparison, MatchEngine, Reveal};
pub use schedule::{ManualScheduler, Scheduler, TaskId};
pub use session::{GameSession, Phase, SessionError};
pub use timer::{Countdown, TICK_INTERVAL};
pub use view::{NullView, View};
