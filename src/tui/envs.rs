//! Virtual environment screen: create / activate / deactivate

use super::input::{handle_edit_key, render_input_box};
use super::state::{App, AppEvent, AppMode};
use super::{layout, theme};
use crate::pip::OperationReport;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvAction {
    Create,
    Activate,
    Deactivate,
}

pub const ACTIONS: &[EnvAction] = &[EnvAction::Create, EnvAction::Activate, EnvAction::Deactivate];

impl EnvAction {
    pub fn label(&self) -> &'static str {
        match self {
            EnvAction::Create => "Create",
            EnvAction::Activate => "Activate",
            EnvAction::Deactivate => "Deactivate",
        }
    }
}

pub fn handle_envs_key(
    key: KeyEvent,
    app: &mut App,
    tx: &mpsc::Sender<AppEvent>,
    term_height: u16,
) {
    match key.code {
        KeyCode::Tab => app.environment.next_action(),
        KeyCode::BackTab => app.environment.prev_action(),
        KeyCode::Enter => trigger_action(app, tx),
        KeyCode::Up => app.environment.scroll_up(1),
        KeyCode::Down => {
            let visible = layout::visible_log_height(term_height);
            app.environment.scroll_down(1, visible);
        }
        KeyCode::PageUp => app.environment.scroll_up(10),
        KeyCode::PageDown => {
            let visible = layout::visible_log_height(term_height);
            app.environment.scroll_down(10, visible);
        }
        _ => {
            handle_edit_key(&mut app.environment.input, key);
        }
    }
}

/// Activate and deactivate are pure state changes and run inline; only
/// creation launches a process and therefore goes to a worker.
pub fn trigger_action(app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    if app.busy {
        return;
    }
    let action = ACTIONS[app.environment.selected];
    let path = app.environment.input.content().trim().to_string();

    match action {
        EnvAction::Activate => {
            let report = app.manager.activate_env(&path);
            app.report_now(AppMode::Environment, report);
        }
        EnvAction::Deactivate => {
            let report = app.manager.deactivate_env();
            app.report_now(AppMode::Environment, report);
        }
        EnvAction::Create => {
            if path.is_empty() {
                app.report_now(AppMode::Environment, OperationReport::err("No path provided!"));
                return;
            }
            app.busy = true;
            app.environment
                .begin(&format!("Creating virtual environment at {path}..."));

            let manager = app.manager.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let report = tokio::task::spawn_blocking(move || manager.create_env(&path))
                    .await
                    .unwrap_or_else(|e| OperationReport::err(format!("Worker failed: {e}")));
                let _ = tx
                    .send(AppEvent::OpFinished {
                        origin: AppMode::Environment,
                        report,
                    })
                    .await;
            });
        }
    }
}

pub fn render_envs(f: &mut Frame, app: &App) {
    let chunks = layout::screen_layout(f.area());

    let env_status = match app.manager.active_env() {
        Some(path) => format!("active: {}", path.display()),
        None => "active: global environment".to_string(),
    };
    layout::render_header(f, &format!("🐍 Virtualenv | {env_status}"), chunks[0]);
    render_input_box(f, &app.environment.input, "Path:", !app.busy, chunks[1]);
    render_action_row(f, app, chunks[2]);
    layout::render_output_log(
        f,
        "Output",
        &app.environment.log,
        app.environment.scroll,
        chunks[3],
    );

    let footer = if app.busy {
        "Working..."
    } else {
        "Tab select action | Enter run | ↑↓ scroll | Esc back"
    };
    layout::render_footer(f, footer, chunks[4]);
}

fn render_action_row(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let mut spans = Vec::new();
    for (i, action) in ACTIONS.iter().enumerate() {
        let style = if i == app.environment.selected {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme::DIM)
        };
        spans.push(Span::styled(format!(" {} ", action.label()), style));
        spans.push(Span::raw("  "));
    }
    let row = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(row, area);
}
