use std::io::{self, BufRead};
use std::thread;

use tracing::{debug, error, info};

use crate::config::{Config, RenderMode};
use crate::error::GameResult;
use crate::game::GameLoop;
use crate::input::{decode_terminal_line, Bindings, InputSlot};
use crate::render::{AsciiSurface, Headless, RenderSurface};
use crate::scheduler::{FixedDelay, RunSummary, Scheduler};

/// The terminal front end: a game, a surface to draw it on and a keyboard thread feeding it.
pub struct App {
    game: GameLoop,
    scheduler: Scheduler<FixedDelay>,
    surface: Box<dyn RenderSurface>,
    keyboard: Option<thread::JoinHandle<()>>,
}

impl App {
    pub fn new(config: Config) -> GameResult<Self> {
        let game = match config.seed {
            Some(seed) => GameLoop::with_seed(seed)?,
            None => GameLoop::new()?,
        };

        let mut surface: Box<dyn RenderSurface> = match config.render {
            RenderMode::Ascii => Box::new(AsciiSurface::new(io::stdout()).clear_screen(true)),
            RenderMode::Headless => Box::new(Headless::default()),
        };

        // Initial draw
        surface.present(&game.frame())?;

        let scheduler = Scheduler::new(FixedDelay::new(config.tick)).with_max_ticks(config.max_ticks);

        // Headless runs have no terminal to read keys from.
        let keyboard = match config.render {
            RenderMode::Ascii => Some(spawn_keyboard(scheduler.input())?),
            RenderMode::Headless => None,
        };

        Ok(Self {
            game,
            scheduler,
            surface,
            keyboard,
        })
    }

    /// Runs until the player quits or the tick limit is reached.
    pub fn run(&mut self) -> RunSummary {
        self.scheduler.run(&mut self.game, self.surface.as_mut())
    }

    pub fn game(&self) -> &GameLoop {
        &self.game
    }

    /// Whether a keyboard thread is feeding this app.
    pub fn reads_keyboard(&self) -> bool {
        self.keyboard.is_some()
    }
}

/// Reads stdin line by line on its own thread, translating keys into commands.
///
/// Terminals deliver input a line at a time, so several keys typed before Enter arrive together;
/// only the last one survives the input slot.
fn spawn_keyboard(slot: InputSlot) -> GameResult<thread::JoinHandle<()>> {
    let bindings = Bindings::default();

    let handle = thread::Builder::new().name("keyboard".into()).spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("Failed to read keyboard input: {e}");
                    break;
                }
            };
            for code in decode_terminal_line(&line) {
                let command = bindings.command_for(&code);
                debug!(%code, ?command, "Key pressed");
                slot.submit(command);
            }
        }
        info!("Keyboard input closed");
    })?;

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_headless_app_runs_without_keyboard() {
        let config = Config {
            seed: Some(3),
            render: RenderMode::Headless,
            max_ticks: Some(5),
            tick: std::time::Duration::from_millis(1),
        };

        let mut app = App::new(config).unwrap();
        assert!(!app.reads_keyboard());

        let summary = app.run();
        assert_eq!(summary.ticks + summary.idle_ticks, 5);
    }
}
