//! PyPI metadata lookup screen

use super::input::{handle_edit_key, render_input_box};
use super::state::{App, AppEvent, AppMode};
use super::layout;
use crate::pip;
use crate::registry::RegistryClient;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use tokio::sync::mpsc;

pub fn handle_info_key(
    key: KeyEvent,
    app: &mut App,
    tx: &mpsc::Sender<AppEvent>,
    term_height: u16,
) {
    match key.code {
        KeyCode::Enter => trigger_fetch(app, tx),
        KeyCode::Up => app.info.scroll_up(1),
        KeyCode::Down => {
            let visible = layout::visible_log_height(term_height);
            app.info.scroll_down(1, visible);
        }
        KeyCode::PageUp => app.info.scroll_up(10),
        KeyCode::PageDown => {
            let visible = layout::visible_log_height(term_height);
            app.info.scroll_down(10, visible);
        }
        _ => {
            handle_edit_key(&mut app.info.input, key);
        }
    }
}

/// The fetch is already async (reqwest), so it runs directly on the
/// runtime rather than through `spawn_blocking`.
pub fn trigger_fetch(app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    if app.busy {
        return;
    }
    let name = match pip::validate_name(app.info.input.content()) {
        Ok(name) => name,
        Err(report) => {
            app.report_now(AppMode::Info, report);
            return;
        }
    };

    app.busy = true;
    app.info
        .begin(&format!("Fetching package information for {name}..."));

    let client = RegistryClient::new(
        app.config.registry_url.clone(),
        app.config.fetch_timeout_secs,
    );
    let tx = tx.clone();
    tokio::spawn(async move {
        let report = client.fetch_report(&name).await;
        let _ = tx
            .send(AppEvent::OpFinished {
                origin: AppMode::Info,
                report,
            })
            .await;
    });
}

pub fn render_info(f: &mut Frame, app: &App) {
    let chunks = layout::screen_layout(f.area());

    layout::render_header(f, "🔎 PyPI Package Info", chunks[0]);
    render_input_box(f, &app.info.input, "Package:", !app.busy, chunks[1]);
    // no action row on this screen; Enter is the single action
    layout::render_footer(f, "Enter fetches metadata from PyPI", chunks[2]);
    layout::render_output_log(f, "Details", &app.info.log, app.info.scroll, chunks[3]);

    let footer = if app.busy {
        "Fetching..."
    } else {
        "Enter fetch | ↑↓ scroll | Esc back"
    };
    layout::render_footer(f, footer, chunks[4]);
}
