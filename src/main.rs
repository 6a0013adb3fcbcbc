mod actions;
mod api;
mod app;
mod config;
mod editor;
mod flows;
mod logging;
mod notifications;
mod state;
mod table;
#[cfg(test)]
mod test_support;
mod types;
mod ui;
mod validation;

use app::App;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use config::Config;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use std::io::stdout;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let log_path = logging::init_tracing()?;
    let config = Config::load().wrap_err("Failed to load configuration")?;
    info!(log = %log_path.display(), base_url = %config.server.base_url, "Configuration loaded");

    let api = api::HttpMeterApi::new(&config.server.base_url)?;

    let terminal = ratatui::init();
    let result = match execute!(stdout(), EnableBracketedPaste) {
        Ok(()) => App::new(api, &config).run(terminal).await,
        Err(e) => Err(e.into()),
    };

    // Restore the terminal even when the loop failed
    let _ = execute!(stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}
