//! TUI host (Ratatui + Crossterm)
//! - Builds the API client from settings
//! - Starts on the login page, swaps to the dashboard after sign-in
//! - Ticks the page so notifications expire
//! - Requests run as background tasks; their results are applied between
//!   key presses, so a slow server never blocks input or redraws

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::api::Client;
use crate::config::Settings;

pub mod input;
pub mod state;
pub mod ui;

pub async fn run(settings: &Settings) -> Result<()> {
    let mut app = init_app(settings)?;

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, settings.tick_rate);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut state::App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        app.drain()?;

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.quit {
            break;
        }
    }
    Ok(())
}

pub fn init_app(settings: &Settings) -> crate::Result<state::App> {
    let client = Client::new(&settings.base_url)?;
    info!(base_url = client.base_url(), layout = settings.layout.as_str(), "client ready");
    state::App::new(client, settings.layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::Error;

    #[test]
    fn bad_base_url_fails_setup() {
        let settings = Settings {
            base_url: "not a url".into(),
            ..Settings::default()
        };
        assert!(matches!(
            init_app(&settings),
            Err(Error::Api(ApiError::InvalidBaseUrl { .. }))
        ));
    }

    #[test]
    fn default_settings_start_on_login() {
        let app = init_app(&Settings::default()).unwrap();
        assert!(matches!(app.screen, state::Screen::Login(_)));
        assert_eq!(app.status, state::LOGIN_HINT);
    }
}
