use crate::ui::app::{App, AppState, Row};
use assetsweep::cleaner::RemovalMode;
use humansize::{BINARY, format_size};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::fmt::Write as _;

const LOG_PLACEHOLDER: &str = "No logs available. Run a deletion process first.";

pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let disk_text = app.root_disk().map_or_else(
        || "Disk: N/A".to_string(),
        |disk| {
            let total = disk.total_space();
            let available = disk.available_space();
            format!(
                "Disk: {} free of {}",
                format_size(available, BINARY),
                format_size(total, BINARY)
            )
        },
    );

    let extensions = app
        .extensions
        .as_ref()
        .map_or_else(|| "all files".to_string(), ToString::to_string);

    let header_text = format!(
        "assetsweep v{} | {} | {} | Mode: {} | Ext: {extensions}",
        env!("CARGO_PKG_VERSION"),
        app.root.display(),
        disk_text,
        app.mode.name()
    );

    let title = Paragraph::new(header_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

pub fn render_prefix_list(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| match row {
            Row::Category(name) => {
                let marker = if app.selection.category_flag(name) {
                    "[*]"
                } else {
                    "[ ]"
                };
                ListItem::new(format!("{marker} {name}"))
                    .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Green))
            }
            Row::Prefix(prefix) => {
                let checkbox = if app.selection.is_selected(prefix) {
                    "[x]"
                } else {
                    "[ ]"
                };
                ListItem::new(format!("    {checkbox} {prefix}"))
            }
        })
        .collect();

    let title = format!("Prefixes ({} selected)", app.selection.selected_count());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

pub fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let selected: Vec<String> = app.selection.selected_prefixes().into_iter().collect();
    let extensions = app
        .extensions
        .as_ref()
        .map_or_else(|| "all files".to_string(), ToString::to_string);

    let mut text = format!(
        "Target Folder: {}\nExtensions: {extensions}\nMode: {}\n",
        app.root.display(),
        app.mode.name()
    );
    if !app.allowlist.is_empty() {
        text.push_str("Protected paths: allowlist active\n");
    }
    if let Some(path) = &app.log_path {
        let _ = writeln!(text, "Log file: {}", path.display());
    }
    let _ = write!(
        text,
        "\nSelected: {}",
        if selected.is_empty() {
            "none".to_string()
        } else {
            selected.join(" ")
        }
    );

    let summary = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Selection"))
        .wrap(Wrap { trim: false });
    f.render_widget(summary, area);
}

pub fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let gauge = match app.state {
        AppState::Scanning => Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Scanning"))
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(0)
            .label(format!("{} matching files so far", app.found)),
        _ => {
            let (completed, total) = app.progress;
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Deleting"))
                .gauge_style(Style::default().fg(Color::Green))
                .percent(app.progress_percent())
                .label(format!("{}% ({completed}/{total})", app.progress_percent()))
        }
    };
    f.render_widget(gauge, area);
}

pub fn render_log_tail(f: &mut Frame, app: &App, area: Rect) {
    let visible = usize::from(area.height.saturating_sub(2));
    let text = if app.log_messages.is_empty() {
        LOG_PLACEHOLDER.to_string()
    } else {
        let start = app.log_messages.len().saturating_sub(visible);
        app.log_messages[start..].join("\n")
    };

    let log = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(log, area);
}

pub fn render_details(f: &mut Frame, app: &App, area: Rect) {
    let busy = matches!(app.state, AppState::Scanning | AppState::Cleaning);
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if busy {
            [Constraint::Length(3), Constraint::Min(0)]
        } else {
            [Constraint::Percentage(50), Constraint::Percentage(50)]
        })
        .split(area);

    if busy {
        render_progress(f, app, right_chunks[0]);
    } else {
        render_summary(f, app, right_chunks[0]);
    }
    render_log_tail(f, app, right_chunks[1]);
}

pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = match app.state {
        AppState::Browsing if app.show_log => "[j/k] Scroll [Esc/l] Close log",
        AppState::Browsing => {
            "[Space] Toggle [a] All [c] Clear [e] Ext filter [t] Trash [l] Log [Enter] Delete [q] Quit"
        }
        AppState::Scanning => "Scanning... [q] Quit",
        AppState::Confirming => "[y/Enter] Confirm [n/Esc] Cancel",
        AppState::Cleaning => "Deleting... [Esc] Cancel",
        AppState::Done(..) => "Done! [Press key to continue]",
    };

    let footer = Paragraph::new(format!("{} | {hints}", app.status))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

pub fn render_log_window(f: &mut Frame, app: &App) {
    let area = centered_rect(80, 80, f.area());
    let text = if app.log_messages.is_empty() {
        LOG_PLACEHOLDER.to_string()
    } else {
        app.log_messages.join("\n")
    };

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Deletion Log"))
            .wrap(Wrap { trim: false })
            .scroll((app.log_scroll, 0)),
        area,
    );
}

pub fn render_popup(f: &mut Frame, app: &App) {
    let (title, msg) = match &app.state {
        AppState::Confirming => {
            let Some(result) = &app.pending else {
                return;
            };
            let action = match app.mode {
                RemovalMode::Permanent => "This action cannot be undone.",
                RemovalMode::Trash => "Files will be moved to the trash.",
            };
            (
                "Confirm Deletion",
                format!(
                    "Found {} files ({}) to delete in:\n{}\n\n{action}\n\n[y] Delete  [n] Cancel",
                    result.len(),
                    format_size(result.total_size(), BINARY),
                    result.root.display()
                ),
            )
        }
        AppState::Done(kind, msg) => (kind.title(), msg.clone()),
        _ => return,
    };

    let block = Block::default().title(title).borders(Borders::ALL);
    let area = centered_rect(60, 30, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(msg)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
