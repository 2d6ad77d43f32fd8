use anyhow::Result;
use tracing::info;

use pacman_gesture::app::App;
use pacman_gesture::config::load_config;
use pacman_gesture::logging::setup_logging;

pub fn main() -> Result<()> {
    setup_logging();

    let config = load_config()?;
    info!(?config, "Configuration loaded");

    let mut app = App::new(config)?;
    let summary = app.run();

    info!(
        ticks = summary.ticks,
        score = app.game().state().score,
        game_over = summary.game_over,
        "Exiting"
    );
    Ok(())
}
