//! Package operations screen: install / uninstall / upgrade / list / purge cache

use super::input::{handle_edit_key, render_input_box};
use super::state::{App, AppEvent, AppMode};
use super::{layout, theme};
use crate::pip::{self, OperationReport};
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
pub enum PackageAction {
    Install,
    Uninstall,
    Upgrade,
    List,
    PurgeCache,
}

pub const ACTIONS: &[PackageAction] = &[
    PackageAction::Install,
    PackageAction::Uninstall,
    PackageAction::Upgrade,
    PackageAction::List,
    PackageAction::PurgeCache,
];

impl PackageAction {
    pub fn label(&self) -> &'static str {
        match self {
            PackageAction::Install => "Install",
            PackageAction::Uninstall => "Uninstall",
            PackageAction::Upgrade => "Upgrade",
            PackageAction::List => "List Installed",
            PackageAction::PurgeCache => "Purge Cache",
        }
    }

    fn needs_name(&self) -> bool {
        matches!(
            self,
            PackageAction::Install | PackageAction::Uninstall | PackageAction::Upgrade
        )
    }

    fn progress_title(&self, name: &str) -> String {
        match self {
            PackageAction::Install => format!("Installing {name}..."),
            PackageAction::Uninstall => format!("Uninstalling {name}..."),
            PackageAction::Upgrade => format!("Upgrading {name}..."),
            PackageAction::List => "Fetching installed packages...".to_string(),
            PackageAction::PurgeCache => "Clearing pip cache...".to_string(),
        }
    }
}

pub fn handle_packages_key(
    key: KeyEvent,
    app: &mut App,
    tx: &mpsc::Sender<AppEvent>,
    term_height: u16,
) {
    match key.code {
        KeyCode::Tab => app.packages.next_action(),
        KeyCode::BackTab => app.packages.prev_action(),
        KeyCode::Enter => trigger_action(app, tx),
        KeyCode::Up => app.packages.scroll_up(1),
        KeyCode::Down => {
            let visible = layout::visible_log_height(term_height);
            app.packages.scroll_down(1, visible);
        }
        KeyCode::PageUp => app.packages.scroll_up(10),
        KeyCode::PageDown => {
            let visible = layout::visible_log_height(term_height);
            app.packages.scroll_down(10, visible);
        }
        _ => {
            handle_edit_key(&mut app.packages.input, key);
        }
    }
}

/// Run the selected action on a blocking worker; the report comes back
/// through the event channel. Name validation happens here, before any
/// worker exists.
pub fn trigger_action(app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    if app.busy {
        return;
    }
    let action = ACTIONS[app.packages.selected];
    let name = if action.needs_name() {
        match pip::validate_name(app.packages.input.content()) {
            Ok(name) => name,
            Err(report) => {
                app.report_now(AppMode::Packages, report);
                return;
            }
        }
    } else {
        String::new()
    };

    app.busy = true;
    app.packages.begin(&action.progress_title(&name));

    let manager = app.manager.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let report = tokio::task::spawn_blocking(move || match action {
            PackageAction::Install => manager.install(&name),
            PackageAction::Uninstall => manager.uninstall(&name),
            PackageAction::Upgrade => manager.upgrade(&name),
            PackageAction::List => manager.list_installed(),
            PackageAction::PurgeCache => manager.purge_cache(),
        })
        .await
        .unwrap_or_else(|e| OperationReport::err(format!("Worker failed: {e}")));
        let _ = tx
            .send(AppEvent::OpFinished {
                origin: AppMode::Packages,
                report,
            })
            .await;
    });
}

pub fn render_packages(f: &mut Frame, app: &App) {
    let chunks = layout::screen_layout(f.area());

    layout::render_header(
        f,
        &format!("📦 Packages | pip: {}", app.manager.resolve_pip()),
        chunks[0],
    );
    render_input_box(f, &app.packages.input, "Package:", !app.busy, chunks[1]);
    render_action_row(f, app, chunks[2]);
    layout::render_output_log(f, "Output", &app.packages.log, app.packages.scroll, chunks[3]);

    let footer = if app.busy {
        "Working...".to_string()
    } else {
        "Tab select action | Enter run | ↑↓ scroll | Esc back".to_string()
    };
    layout::render_footer(f, &footer, chunks[4]);
}

fn render_action_row(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let mut spans = Vec::new();
    for (i, action) in ACTIONS.iter().enumerate() {
        let style = if i == app.packages.selected {
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
