//! Drives a [`GameLoop`] at a fixed rate.
//!
//! The scheduler is single-threaded: it waits on a [`TickSource`], drains the shared [`InputSlot`],
//! ticks the game and presents the frame. Other threads only ever touch the input slot and the
//! [`SchedulerHandle`] flags.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::formatter;
use crate::game::{state::TickOutcome, GameLoop};
use crate::input::{commands::GameCommand, InputSlot};
use crate::render::RenderSurface;

/// Decides when the next tick happens.
pub trait TickSource {
    /// Blocks until the next tick is due. Returns false once no more ticks will come.
    fn wait_next(&mut self) -> bool;
}

/// Ticks every `period`, measured from the previous wake-up. Lateness is reported, never caught up.
#[derive(Debug)]
pub struct FixedDelay {
    period: Duration,
    last: Option<Instant>,
}

impl FixedDelay {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }
}

impl TickSource for FixedDelay {
    fn wait_next(&mut self) -> bool {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                spin_sleep::sleep(self.period - elapsed);
            } else if elapsed > self.period {
                warn!("Game loop behind schedule by: {:?}", elapsed - self.period);
            }
        }
        self.last = Some(Instant::now());
        true
    }
}

/// Yields a fixed number of ticks without waiting. Used to drive the loop synchronously.
#[derive(Debug, Clone, Copy)]
pub struct ManualTicks {
    remaining: u64,
}

impl ManualTicks {
    pub fn new(ticks: u64) -> Self {
        Self { remaining: ticks }
    }
}

impl TickSource for ManualTicks {
    fn wait_next(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// A one-way stop signal, shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Remote control for a running scheduler.
#[derive(Debug, Clone, Default)]
pub struct SchedulerHandle {
    cancel: CancellationToken,
    paused: Arc<AtomicBool>,
}

impl SchedulerHandle {
    /// Stops the loop before its next tick.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
    }

    /// Flips the pause flag, returning the new state.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }
}

/// What happened over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks that advanced the simulation.
    pub ticks: u64,
    /// Ticks spent paused or waiting on a finished game.
    pub idle_ticks: u64,
    pub lives_lost: u64,
    pub foods_eaten: u64,
    pub levels_completed: u64,
    pub render_errors: u64,
    /// Whether the game was over when the loop stopped.
    pub game_over: bool,
}

impl RunSummary {
    fn record(&mut self, outcome: TickOutcome) {
        self.ticks += 1;
        if outcome.contains(TickOutcome::LIFE_LOST) {
            self.lives_lost += 1;
        }
        if outcome.contains(TickOutcome::FOOD_EATEN) {
            self.foods_eaten += 1;
        }
        if outcome.contains(TickOutcome::LEVEL_COMPLETE) {
            self.levels_completed += 1;
        }
    }
}

pub struct Scheduler<S: TickSource> {
    source: S,
    input: InputSlot,
    handle: SchedulerHandle,
    max_ticks: Option<u64>,
    render_errors: u64,
}

impl<S: TickSource> Scheduler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            input: InputSlot::new(),
            handle: SchedulerHandle::default(),
            max_ticks: None,
            render_errors: 0,
        }
    }

    /// Stops after this many loop iterations, idle ones included.
    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// The slot input threads should submit commands to.
    pub fn input(&self) -> InputSlot {
        self.input.clone()
    }

    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    /// Applies a drained command. Pause and exit are handled here; everything else goes to the game.
    ///
    /// While paused only control commands are honored, so the board stays frozen.
    fn apply(&self, game: &mut GameLoop, command: GameCommand) {
        match command {
            GameCommand::Exit => {
                info!("Exit requested. Exiting...");
                self.handle.cancel();
            }
            GameCommand::TogglePause => {
                let paused = self.handle.toggle_pause();
                info!("{}", if paused { "Paused" } else { "Unpaused" });
            }
            command if self.handle.is_paused() => debug!(?command, "Ignoring input while paused"),
            command => game.handle_command(command),
        }
    }

    /// Runs one loop iteration: drain input, then tick and present unless paused or finished.
    ///
    /// Returns the tick outcome, or `None` if the iteration was idle.
    pub fn run_once(&mut self, game: &mut GameLoop, surface: &mut dyn RenderSurface) -> Option<TickOutcome> {
        if let Some(command) = self.input.take() {
            self.apply(game, command);
        }

        if self.handle.is_cancelled() || self.handle.is_paused() || game.is_game_over() {
            return None;
        }

        formatter::increment_tick();
        let outcome = game.tick();
        if let Err(e) = surface.present(&game.frame()) {
            error!("Failed to draw game: {e}");
            self.render_errors += 1;
        }
        Some(outcome)
    }

    /// Runs until the tick source runs dry, the handle is cancelled or the tick limit is hit.
    pub fn run(&mut self, game: &mut GameLoop, surface: &mut dyn RenderSurface) -> RunSummary {
        info!(max_ticks = ?self.max_ticks, "Starting game loop");
        let mut summary = RunSummary::default();
        let mut iterations = 0u64;
        let errors_before = self.render_errors;

        while !self.handle.is_cancelled() && self.source.wait_next() {
            if self.max_ticks.is_some_and(|max| iterations >= max) {
                debug!(iterations, "Tick limit reached");
                break;
            }
            iterations += 1;

            match self.run_once(game, surface) {
                Some(outcome) => {
                    summary.record(outcome);
                    if outcome.contains(TickOutcome::GAME_OVER) {
                        info!(score = game.state().score, "Waiting for input to restart");
                    }
                }
                None => summary.idle_ticks += 1,
            }
        }

        summary.render_errors = self.render_errors - errors_before;
        summary.game_over = game.is_game_over();
        info!(ticks = summary.ticks, idle = summary.idle_ticks, "Game loop stopped");
        summary
    }
}
