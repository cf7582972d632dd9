use std::io;

use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use nightsky_config::Config;
use ratatui::DefaultTerminal;

mod app;
mod logging;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config_path = Config::path()?;
    let config = Config::load_or_init(&config_path).wrap_err_with(|| {
        format!("failed to load configuration from {}", config_path.display())
    })?;
    // Logging is configured by the file itself, so it starts afterwards.
    let _log_guard = logging::init(&config.log)?;
    tracing::info!(path = %config_path.display(), "using config");

    let terminal = ratatui::init();
    let result = run(terminal, config);
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn run(terminal: DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    execute!(io::stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    App::new(config, size.width, size.height)?.run(terminal)
}
