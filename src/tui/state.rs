use super::input::InputBox;
use crate::config::Config;
use crate::pip::{OperationReport, PipManager, NAME_PLACEHOLDER};
use chrono::Local;

// ========== Enums ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Dashboard,
    Packages,    // p: install / uninstall / upgrade / list / purge cache
    Environment, // e: create / activate / deactivate virtualenv
    Info,        // f: PyPI metadata lookup
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

/// Modal notice, the TUI stand-in for the original's message boxes.
#[derive(Debug, Clone)]
pub struct Dialog {
    pub kind: DialogKind,
    pub text: String,
}

impl Dialog {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            text: text.into(),
        }
    }

    pub fn from_report(report: &OperationReport) -> Self {
        // Dialogs show the conclusion, the log keeps the full text.
        let last_line = report
            .text
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("")
            .to_string();
        if report.success {
            Self::info(last_line)
        } else {
            Self::error(last_line)
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Info => "Info",
            DialogKind::Error => "Error",
        }
    }
}

// ========== Events ==========

#[derive(Debug)]
pub enum AppEvent {
    /// A worker finished; `origin` is the screen that started it.
    OpFinished {
        origin: AppMode,
        report: OperationReport,
    },
}

// ========== Screen state ==========

/// State shared by the three operation screens: one input line, the list
/// of selectable actions, and the output log that is overwritten per
/// operation.
pub struct OpScreen {
    pub input: InputBox,
    pub selected: usize,
    pub action_count: usize,
    pub log: Vec<String>,
    pub scroll: usize,
}

impl OpScreen {
    pub fn new(placeholder: &'static str, action_count: usize) -> Self {
        Self {
            input: InputBox::new(placeholder),
            selected: 0,
            action_count,
            log: Vec::new(),
            scroll: 0,
        }
    }

    pub fn next_action(&mut self) {
        self.selected = (self.selected + 1) % self.action_count;
    }

    pub fn prev_action(&mut self) {
        self.selected = (self.selected + self.action_count - 1) % self.action_count;
    }

    /// Overwrite the log with a timestamped progress line.
    pub fn begin(&mut self, title: &str) {
        self.log = vec![format!("[{}] {title}", Local::now().format("%H:%M:%S"))];
        self.scroll = 0;
    }

    /// Overwrite the log with the finished report.
    pub fn finish(&mut self, report: &OperationReport) {
        self.log = report.text.lines().map(|l| l.to_string()).collect();
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize, visible: usize) {
        let max = self.log.len().saturating_sub(visible);
        self.scroll = (self.scroll + lines).min(max);
    }

    pub fn clamp_scroll(&mut self, visible: usize) {
        let max = self.log.len().saturating_sub(visible);
        self.scroll = self.scroll.min(max);
    }
}

// ========== App ==========

pub struct App {
    pub mode: AppMode,
    pub config: Config,
    pub manager: PipManager,
    pub dialog: Option<Dialog>,
    /// One operation in flight at a time; action keys are ignored while set.
    pub busy: bool,
    pub should_quit: bool,
    pub packages: OpScreen,
    pub environment: OpScreen,
    pub info: OpScreen,
}

impl App {
    pub fn new(manager: PipManager, config: Config) -> Self {
        Self {
            mode: AppMode::Dashboard,
            config,
            manager,
            dialog: None,
            busy: false,
            should_quit: false,
            packages: OpScreen::new(NAME_PLACEHOLDER, super::packages::ACTIONS.len()),
            environment: OpScreen::new(
                "Enter virtual environment path...",
                super::envs::ACTIONS.len(),
            ),
            info: OpScreen::new(NAME_PLACEHOLDER, 1),
        }
    }

    pub fn screen_mut(&mut self, mode: AppMode) -> Option<&mut OpScreen> {
        match mode {
            AppMode::Dashboard => None,
            AppMode::Packages => Some(&mut self.packages),
            AppMode::Environment => Some(&mut self.environment),
            AppMode::Info => Some(&mut self.info),
        }
    }

    /// Route a finished worker's report to the screen that started it and
    /// raise the matching dialog.
    pub fn apply_report(&mut self, origin: AppMode, report: OperationReport) {
        self.busy = false;
        self.dialog = Some(Dialog::from_report(&report));
        if let Some(screen) = self.screen_mut(origin) {
            screen.finish(&report);
        }
    }

    /// Deliver a report produced without a worker (inline operations and
    /// synchronous validation failures): log + dialog.
    pub fn report_now(&mut self, mode: AppMode, report: OperationReport) {
        self.dialog = Some(Dialog::from_report(&report));
        if let Some(screen) = self.screen_mut(mode) {
            screen.finish(&report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_selection_wraps_both_ways() {
        let mut screen = OpScreen::new("x", 3);
        screen.prev_action();
        assert_eq!(screen.selected, 2);
        screen.next_action();
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn finish_overwrites_previous_log() {
        let mut screen = OpScreen::new("x", 1);
        screen.begin("Installing requests...");
        screen.scroll = 5;
        screen.finish(&OperationReport::ok("line one\nline two"));
        assert_eq!(screen.log, vec!["line one", "line two"]);
        assert_eq!(screen.scroll, 0);
    }

    #[test]
    fn dialog_shows_the_last_report_line() {
        let report =
            OperationReport::ok("Installing requests...\nrequests has been installed successfully.");
        let dialog = Dialog::from_report(&report);
        assert_eq!(dialog.kind, DialogKind::Info);
        assert_eq!(dialog.text, "requests has been installed successfully.");
    }
}
