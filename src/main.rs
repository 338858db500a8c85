//! TUIDEX - Terminal Pokedex & Task Board
//!
//! A multi-page terminal application: a blog placeholder, a counter, a
//! paginated Pokedex backed by the public PokeAPI, and a reorderable
//! to-do list persisted to disk.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::App;
use infrastructure::{FileStore, PokeApiClient, CATALOGUE_LIMIT, DEFAULT_STORE_FILE};
use presentation::{render_ui, InputHandler};

/// Entry point for the tuidex terminal application.
///
/// Loads the catalogue and the task store, sets up the terminal
/// interface, and runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the catalogue fetch or the store file fails, or if
/// there are issues with the terminal interface during runtime. The
/// catalogue fetch performs no retries; failures propagate untouched.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Both collaborators are resolved before the UI comes up, like the
    // original pages whose data loading ran before the first render.
    println!("Fetching catalogue from PokeAPI...");
    let items = PokeApiClient::default().fetch_catalogue(CATALOGUE_LIMIT)?;
    let store = FileStore::open(DEFAULT_STORE_FILE)?;
    let mut app = App::new(items, Box::new(store));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering and keyboard input processing.
/// Continues running until the user presses 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, application::AppMode::Normal) => {
                        return Ok(())
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
