use super::state::App;
use super::theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const ASCII_LOGO: &str = r#"
██████╗  ██╗ ██████╗  ███╗   ███╗  █████╗  ████████╗ ███████╗
██╔══██╗ ██║ ██╔══██╗ ████╗ ████║ ██╔══██╗ ╚══██╔══╝ ██╔════╝
██████╔╝ ██║ ██████╔╝ ██╔████╔██║ ███████║    ██║    █████╗
██╔═══╝  ██║ ██╔═══╝  ██║╚██╔╝██║ ██╔══██║    ██║    ██╔══╝
██║      ██║ ██║      ██║ ╚═╝ ██║ ██║  ██║    ██║    ███████╗
╚═╝      ╚═╝ ╚═╝      ╚═╝     ╚═╝ ╚═╝  ╚═╝    ╚═╝    ╚══════╝"#;

pub fn render_dashboard(f: &mut Frame, app: &App) {
    let area = f.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // logo
            Constraint::Length(4), // environment status
            Constraint::Min(0),    // menu
        ])
        .split(inner);

    let logo = Paragraph::new(ASCII_LOGO)
        .style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(logo, chunks[0]);

    let env_line = match app.manager.active_env() {
        Some(path) => Line::from(vec![
            Span::styled("Environment: ", Style::default().fg(theme::DIM)),
            Span::styled(
                path.display().to_string(),
                Style::default().fg(theme::OK).add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(vec![
            Span::styled("Environment: ", Style::default().fg(theme::DIM)),
            Span::styled("global", Style::default().fg(theme::DIM)),
        ]),
    };
    let pip_line = Line::from(vec![
        Span::styled("pip: ", Style::default().fg(theme::DIM)),
        Span::raw(app.manager.resolve_pip()),
    ]);
    let status = Paragraph::new(vec![env_line, pip_line]).alignment(Alignment::Center);
    f.render_widget(status, chunks[1]);

    let menu = vec![
        Line::from(""),
        menu_line("p", "Packages    install / uninstall / upgrade / list / purge cache"),
        menu_line("e", "Virtualenv  create / activate / deactivate"),
        menu_line("f", "Fetch Info  PyPI package metadata"),
        Line::from(""),
        menu_line("q", "Quit"),
    ];
    let menu = Paragraph::new(menu).alignment(Alignment::Center);
    f.render_widget(menu, chunks[2]);
}

fn menu_line(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("[{key}] "),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(text),
    ])
}
