pub mod app;
pub mod components;

use crate::ui::app::{App, AppState};
use crate::ui::components::{
    render_details, render_footer, render_header, render_log_window, render_popup,
    render_prefix_list,
};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use std::time::Duration;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_prefix_list(f, app, main_chunks[0]);
    render_details(f, app, main_chunks[1]);

    render_footer(f, app, chunks[2]);
    if app.show_log {
        render_log_window(f, app);
    }
    render_popup(f, app);
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stderr>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Check for scanning results
        if let AppState::Scanning = app.state {
            app.check_scan_status();
        }

        // Check for async cleaning results
        if let AppState::Cleaning = app.state {
            app.check_cleaning_status();
        }

        // Event polling with timeout to allow UI updates during Cleaning
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app.state {
                AppState::Browsing if app.show_log => match key.code {
                    KeyCode::Esc | KeyCode::Char('l' | 'q') => app.toggle_log(),
                    KeyCode::Down | KeyCode::Char('j') => app.scroll_log_down(),
                    KeyCode::Up | KeyCode::Char('k') => app.scroll_log_up(),
                    _ => {}
                },
                AppState::Browsing => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::Char(' ') => app.toggle(),
                    KeyCode::Char('a') => app.select_all(),
                    KeyCode::Char('c') => app.clear_selection(),
                    KeyCode::Char('e') => app.toggle_extensions(),
                    KeyCode::Char('t') => app.toggle_mode(),
                    KeyCode::Char('l') => app.toggle_log(),
                    KeyCode::Enter => app.start_scan(),
                    _ => {}
                },
                AppState::Scanning => {
                    if let KeyCode::Char('q') | KeyCode::Esc = key.code {
                        return Ok(());
                    }
                }
                AppState::Confirming => match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => app.clean_selected(),
                    KeyCode::Char('n' | 'q') | KeyCode::Esc => app.cancel_confirmation(),
                    _ => {}
                },
                AppState::Cleaning => {
                    if let KeyCode::Esc = key.code {
                        app.cancel_cleaning();
                    }
                }
                AppState::Done(..) => match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ' | 'q') => {
                        app.state = AppState::Browsing;
                    }
                    _ => {}
                },
            }
        }
    }
}
