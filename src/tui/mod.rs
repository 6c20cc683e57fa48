mod dashboard;
mod dialog;
mod envs;
mod info;
pub mod input;
mod layout;
mod packages;
pub mod state;
mod theme;

use crate::config::Config;
use crate::pip::PipManager;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use state::{App, AppEvent, AppMode};
use std::io;
use tokio::sync::mpsc;

pub async fn run(manager: PipManager, config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(manager, config);
    let (tx, mut rx) = mpsc::channel(32);

    loop {
        // keep the output pane scroll valid after log overwrites
        let term_size = terminal.size()?;
        let visible = layout::visible_log_height(term_size.height);
        let mode = app.mode;
        if let Some(screen) = app.screen_mut(mode) {
            screen.clamp_scroll(visible);
        }

        terminal.draw(|f| ui(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // a modal dialog eats every key until dismissed
                if app.dialog.is_some() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                        app.dialog = None;
                    }
                    continue;
                }

                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    app.should_quit = true;
                    continue;
                }

                match app.mode {
                    AppMode::Dashboard => match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('p') => app.mode = AppMode::Packages,
                        KeyCode::Char('e') => app.mode = AppMode::Environment,
                        KeyCode::Char('f') => app.mode = AppMode::Info,
                        _ => {}
                    },
                    mode => {
                        if key.code == KeyCode::Esc {
                            // back to the dashboard; an in-flight worker keeps
                            // running and reports to its origin screen
                            app.mode = AppMode::Dashboard;
                        } else {
                            let height = term_size.height;
                            match mode {
                                AppMode::Packages => {
                                    packages::handle_packages_key(key, &mut app, &tx, height)
                                }
                                AppMode::Environment => {
                                    envs::handle_envs_key(key, &mut app, &tx, height)
                                }
                                AppMode::Info => info::handle_info_key(key, &mut app, &tx, height),
                                AppMode::Dashboard => {}
                            }
                        }
                    }
                }
            }
        }

        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::OpFinished { origin, report } => {
                    app.apply_report(origin, report);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    match app.mode {
        AppMode::Dashboard => dashboard::render_dashboard(f, app),
        AppMode::Packages => packages::render_packages(f, app),
        AppMode::Environment => envs::render_envs(f, app),
        AppMode::Info => info::render_info(f, app),
    }

    if let Some(dialog) = &app.dialog {
        dialog::render_dialog(f, dialog);
    }
}
