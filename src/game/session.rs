use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use super::board::{Board, CardId};
use super::catalog::{CatalogError, LevelCatalog, LevelDefinition};
use super::config::GameConfig;
use super::deck::deal;
use super::engine::{Comparison, MatchEngine, Reveal};
use super::schedule::{ManualScheduler, Scheduler, TaskId};
use super::timer::{Countdown, TICK_INTERVAL};
use super::view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Welcome,
    Playing,
    /// Board cleared. `is_final` marks the end of the last level.
    LevelComplete { is_final: bool },
    GameOver,
    TimeOver,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    OutOfRange(#[from] CatalogError),
    #[error("no game has been started yet")]
    NotStarted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    ClearMismatch([CardId; 2]),
    CompleteLevel,
    TimerTick,
}

/// Root of a running game: level progression, move budget, clock and the
/// deferred work hanging off them.
pub struct GameSession<V: View, S: Scheduler> {
    catalog: LevelCatalog,
    countdown_start: Countdown,
    reveal_delay: Duration,

    phase: Phase,
    level_index: usize,
    move_count: u32,
    relax_mode: bool,
    countdown: Countdown,
    timer_running: bool,
    board: Board,
    engine: MatchEngine,

    pending: Vec<(TaskId, Task)>,
    next_task_id: u64,
    rng: StdRng,
    view: V,
    scheduler: S,
}

impl<V: View, S: Scheduler> GameSession<V, S> {
    /// Session over the reference catalog and default timings.
    pub fn new(view: V, scheduler: S) -> Self {
        Self::with_parts(LevelCatalog::reference(), &GameConfig::default(), view, scheduler)
    }

    pub fn from_config(config: &GameConfig, view: V, scheduler: S) -> Result<Self, CatalogError> {
        let catalog = config.catalog()?;
        Ok(Self::with_parts(catalog, config, view, scheduler))
    }

    fn with_parts(catalog: LevelCatalog, config: &GameConfig, view: V, scheduler: S) -> Self {
        GameSession {
            catalog,
            countdown_start: config.countdown,
            reveal_delay: config.reveal_delay(),
            phase: Phase::Welcome,
            level_index: 0,
            move_count: 0,
            relax_mode: false,
            countdown: config.countdown,
            timer_running: false,
            board: Board::default(),
            engine: MatchEngine::new(),
            pending: Vec::new(),
            next_task_id: 0,
            rng: StdRng::from_os_rng(),
            view,
            scheduler,
        }
    }

    /// Reproducible deals.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.catalog.level_count()
    }

    pub fn current_level(&self) -> &LevelDefinition {
        // level_index only ever takes values validated against the catalog.
        &self.catalog.levels()[self.level_index]
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn relax_mode(&self) -> bool {
        self.relax_mode
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pending_task_count(&self) -> usize {
        self.pending.len()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Leaves the welcome screen (or abandons the current run) and plays
    /// level 0 in the chosen mode.
    pub fn start_game(&mut self, relax: bool) {
        info!("starting game (relax: {relax})");
        self.relax_mode = relax;
        self.level_index = 0;
        self.view.game_started(relax);
        self.begin_level();
    }

    /// Back to level 0 in the current mode.
    pub fn restart_game(&mut self) {
        info!("restarting game");
        if self.phase == Phase::Welcome {
            self.view.game_started(self.relax_mode);
        }
        self.level_index = 0;
        self.begin_level();
    }

    /// Moves on after a cleared, non-final level. Returns `false` when there
    /// is nothing to advance to.
    pub fn advance_level(&mut self) -> bool {
        if self.phase != (Phase::LevelComplete { is_final: false }) {
            debug!("advance ignored in phase {:?}", self.phase);
            return false;
        }
        self.level_index += 1;
        info!("advancing to level {}", self.level_index + 1);
        self.begin_level();
        true
    }

    /// Jumps straight to `index` with a fresh board.
    pub fn select_level(&mut self, index: usize) -> Result<(), SessionError> {
        if self.phase == Phase::Welcome {
            return Err(SessionError::NotStarted);
        }
        self.catalog.get_level(index)?;
        info!("level {} selected", index + 1);
        self.level_index = index;
        self.begin_level();
        Ok(())
    }

    pub fn flip_card(&mut self, id: CardId) {
        if self.phase != Phase::Playing {
            debug!("flip of {:?} ignored in phase {:?}", id, self.phase);
            return;
        }
        match self.engine.reveal(&mut self.board, id) {
            Reveal::Rejected => debug!("flip of {:?} rejected", id),
            Reveal::Flipped(id) => self.view.card_revealed(id),
            Reveal::Compared(comparison) => {
                self.view.card_revealed(comparison.second);
                self.on_comparison(comparison);
            }
        }
    }

    /// One second off the clock. Ignored unless a timed level is in play.
    pub fn timer_tick(&mut self) {
        if self.phase != Phase::Playing || !self.timer_running {
            return;
        }
        let expired = self.countdown.tick();
        self.view
            .timer_changed(self.countdown.minutes, self.countdown.seconds);
        if expired {
            self.stop_timer();
            self.phase = Phase::TimeOver;
            info!("time over on level {}", self.level_index + 1);
            self.view.time_over();
        }
    }

    /// Runs a task previously handed to the scheduler. Cancelled or unknown
    /// ids are ignored.
    pub fn fire(&mut self, id: TaskId) {
        let Some(pos) = self.pending.iter().position(|(task_id, _)| *task_id == id) else {
            debug!("stale task {:?} ignored", id);
            return;
        };
        let (_, task) = self.pending.remove(pos);
        match task {
            Task::ClearMismatch(cards) => {
                let cleared = self.engine.clear_mismatch(&mut self.board, cards);
                if !cleared.is_empty() {
                    self.view.cards_cleared(&cleared);
                }
            }
            Task::CompleteLevel => self.complete_level(),
            Task::TimerTick => {
                self.timer_tick();
                if self.timer_running {
                    self.schedule(Task::TimerTick, TICK_INTERVAL);
                }
            }
        }
    }

    fn on_comparison(&mut self, comparison: Comparison) {
        let cards = comparison.cards();
        if comparison.matched {
            self.view.cards_matched(cards);
        } else {
            self.view.cards_mismatched(cards);
            self.schedule(Task::ClearMismatch(cards), self.reveal_delay);
        }

        self.move_count += 1;
        let max_moves = self.current_level().max_moves;
        self.view.move_count_changed(self.move_count, max_moves);

        if self.move_count > max_moves && !self.relax_mode {
            self.stop_timer();
            self.phase = Phase::GameOver;
            info!(
                "game over on level {} after {} moves",
                self.level_index + 1,
                self.move_count
            );
            self.view.game_over();
        }

        if self.board.is_complete() {
            self.stop_timer();
            self.schedule(Task::CompleteLevel, self.reveal_delay);
        }
    }

    fn complete_level(&mut self) {
        // A winning move may also have blown the move budget; the win still counts.
        if !matches!(self.phase, Phase::Playing | Phase::GameOver) || !self.board.is_complete() {
            return;
        }
        let is_final = self.catalog.is_last(self.level_index);
        self.phase = Phase::LevelComplete { is_final };
        info!(
            "level {} complete in {} moves (final: {is_final})",
            self.level_index + 1,
            self.move_count
        );
        self.view.level_complete(is_final);
    }

    fn begin_level(&mut self) {
        self.cancel_all_tasks();
        self.timer_running = false;
        self.engine.reset();
        self.move_count = 0;
        self.board = deal(&self.catalog.levels()[self.level_index], &mut self.rng);
        self.phase = Phase::Playing;

        let max_moves = self.current_level().max_moves;
        self.view.level_changed(self.level_index);
        self.view.board_dealt(self.board.cards());
        self.view.move_count_changed(0, max_moves);

        if !self.relax_mode {
            self.start_timer();
        }
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        self.countdown = self.countdown_start;
        self.timer_running = true;
        self.view
            .timer_changed(self.countdown.minutes, self.countdown.seconds);
        self.schedule(Task::TimerTick, TICK_INTERVAL);
    }

    fn stop_timer(&mut self) {
        self.timer_running = false;
        let scheduler = &mut self.scheduler;
        self.pending.retain(|(id, task)| {
            if *task == Task::TimerTick {
                scheduler.cancel(*id);
                false
            } else {
                true
            }
        });
    }

    fn schedule(&mut self, task: Task, delay: Duration) -> TaskId {
        let id = TaskId(self.next_task_id);
        self.next_task_id += 1;
        self.pending.push((id, task));
        self.scheduler.schedule(id, delay);
        id
    }

    fn cancel_all_tasks(&mut self) {
        for (id, _) in self.pending.drain(..) {
            self.scheduler.cancel(id);
        }
    }
}

impl<V: View> GameSession<V, ManualScheduler> {
    /// Moves the virtual clock forward, firing every task that comes due on
    /// the way, including tasks scheduled by earlier firings.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(id) = self.scheduler.pop_due(until) {
            self.fire(id);
        }
        self.scheduler.set_now(until);
    }
}
