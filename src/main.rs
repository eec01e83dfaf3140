mod auth;
mod config;
mod controller;
mod error;
mod logging;
mod model;
mod view;

use std::io;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::{Cli, Settings};
use controller::AppController;
use model::{AppModel, Remote, SpotifyClient};
use view::AppView;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    let _log_guard = match logging::init_logging(&settings.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        }
    };

    tracing::info!(page_size = settings.page_size, "=== cob client starting ===");

    // Login prompts on the plain terminal, before raw mode
    let spotify = auth::authorize(&settings.credentials, &settings.token_cache).await?;
    let model = AppModel::new(SpotifyClient::new(spotify), settings.page_size).await?;
    let mut controller = AppController::new(model);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let res = run_app(&mut terminal, &mut controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &res {
        Ok(()) => tracing::info!("cob client shutting down"),
        Err(err) => tracing::error!(error = ?err, "Application error"),
    }
    res
}

/// One input event at a time: fetch what the frame needs, draw it, then
/// block on the next key.
async fn run_app<R: Remote>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut AppController<R>,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        if let Err(e) = controller
            .model_mut()
            .prepare_frame(AppView::viewport_rows(size.height))
            .await
        {
            controller.report(e)?;
        }

        terminal.draw(|f| AppView::render(f, controller.model()))?;

        if controller.model().should_quit() {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            if let Err(e) = controller.handle_key_event(key).await {
                controller.report(e)?;
            }
        }
    }
}
