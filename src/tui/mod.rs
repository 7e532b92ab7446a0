// src/tui/mod.rs

//! Interactive terminal frontend for the profile form.
//!
//! Runs a crossterm/ratatui draw-and-poll loop on the current thread while
//! network requests run on the tokio runtime; completions re-enter the loop
//! as [`AppEvent`]s drained from an mpsc channel each iteration.

mod app;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;
use crate::services::RecommendApi;

pub use app::{App, AppEvent};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the interactive form until the user quits.
///
/// Must be called from within a tokio runtime; the loop itself blocks the
/// calling thread, so drive it through `tokio::task::block_in_place`.
pub fn run(api: Arc<dyn RecommendApi>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (mut app, mut rx) = App::new(api);
    app.start_option_fetches();

    let result = event_loop(&mut terminal, &mut app, &mut rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(app_event) = rx.try_recv() {
            app.handle_event(app_event);
        }
    }

    Ok(())
}
