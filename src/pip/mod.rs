//! pip operation layer: environment selection plus wrappers around the
//! pip and venv command-line contracts

pub mod runner;
pub mod types;

pub use runner::{CommandRunner, SystemRunner};
pub use types::{ExecOutput, OperationReport, NAME_PLACEHOLDER};

use crate::venv::{self, Platform};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Owns the currently selected virtual environment and runs every pip /
/// venv operation through the injected [`CommandRunner`]. Clones share the
/// selection, so a worker task and the UI always agree on which pip is
/// being invoked.
#[derive(Clone)]
pub struct PipManager {
    runner: Arc<dyn CommandRunner>,
    platform: Platform,
    env: Arc<Mutex<Option<PathBuf>>>,
}

impl PipManager {
    pub fn new(runner: Arc<dyn CommandRunner>, platform: Platform) -> Self {
        Self {
            runner,
            platform,
            env: Arc::new(Mutex::new(None)),
        }
    }

    /// Manager wired to the real process launcher for the current OS.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemRunner), Platform::current())
    }

    /// Currently selected environment root, if any.
    pub fn active_env(&self) -> Option<PathBuf> {
        self.env.lock().unwrap().clone()
    }

    /// pip executable to invoke: the one inside the selected environment,
    /// or the system-wide `pip` when nothing is selected.
    pub fn resolve_pip(&self) -> String {
        match self.env.lock().unwrap().as_ref() {
            Some(root) => self.platform.pip_in_env(root).display().to_string(),
            None => "pip".to_string(),
        }
    }

    // ===== Environment lifecycle =====

    pub fn create_env(&self, path: &str) -> OperationReport {
        let path = path.trim();
        if path.is_empty() {
            return OperationReport::err("No path provided!");
        }
        let root = PathBuf::from(path);
        if venv::is_valid_env(&root, self.platform) {
            return OperationReport::err(
                "A valid virtual environment already exists at this path!",
            );
        }

        log::info!("creating virtual environment at {path}");
        let python = self.platform.python_command();
        match self.runner.run(python, &["-m", "venv", path]) {
            Ok(out) if out.success => {
                *self.env.lock().unwrap() = Some(root);
                OperationReport::ok(format!(
                    "Creating virtual environment at {path}...\n\
                     Virtual environment created and activated at {path}"
                ))
            }
            Ok(out) => OperationReport::err(format!(
                "Error creating virtual environment: {}",
                out.stderr.trim()
            )),
            Err(e) => {
                OperationReport::err(format!("Error creating virtual environment: {e}"))
            }
        }
    }

    pub fn activate_env(&self, path: &str) -> OperationReport {
        let path = path.trim();
        if path.is_empty() {
            return OperationReport::err("No path provided!");
        }
        let root = PathBuf::from(path);
        if !venv::is_valid_env(&root, self.platform) {
            return OperationReport::err("Invalid virtual environment path!");
        }
        *self.env.lock().unwrap() = Some(root);
        log::info!("virtual environment activated: {path}");
        OperationReport::ok(format!("Virtual environment activated: {path}"))
    }

    pub fn deactivate_env(&self) -> OperationReport {
        let mut env = self.env.lock().unwrap();
        if env.is_none() {
            return OperationReport::err("No virtual environment is currently active!");
        }
        *env = None;
        OperationReport::ok("Virtual environment deactivated. Using global environment now.")
    }

    // ===== Package operations =====

    pub fn install(&self, name: &str) -> OperationReport {
        let name = match validate_name(name) {
            Ok(n) => n,
            Err(report) => return report,
        };
        let pip = self.resolve_pip();

        if self.probe_installed(&pip, &name) {
            return OperationReport::ok(format!("{name} is already installed."));
        }

        log::info!("installing {name} via {pip}");
        match self.runner.run(&pip, &["install", &name]) {
            Ok(out) if out.success => OperationReport::ok(format!(
                "Installing {name}...\n{name} has been installed successfully."
            )),
            _ => OperationReport::err(format!("Couldn't find or install {name}.")),
        }
    }

    pub fn uninstall(&self, name: &str) -> OperationReport {
        let name = match validate_name(name) {
            Ok(n) => n,
            Err(report) => return report,
        };
        let pip = self.resolve_pip();

        if !self.probe_installed(&pip, &name) {
            return OperationReport::err(format!(
                "{name} is not installed or an error occurred."
            ));
        }

        log::info!("uninstalling {name} via {pip}");
        match self.runner.run(&pip, &["uninstall", &name, "-y"]) {
            Ok(out) if out.success => OperationReport::ok(format!(
                "Uninstalling {name}...\n{name} has been uninstalled successfully."
            )),
            _ => OperationReport::err(format!(
                "{name} is not installed or an error occurred."
            )),
        }
    }

    /// No presence probe: pip itself reports whether there was anything to
    /// upgrade.
    pub fn upgrade(&self, name: &str) -> OperationReport {
        let name = match validate_name(name) {
            Ok(n) => n,
            Err(report) => return report,
        };
        let pip = self.resolve_pip();

        log::info!("upgrading {name} via {pip}");
        match self.runner.run(&pip, &["install", "--upgrade", &name]) {
            Ok(out) if out.success => OperationReport::ok(format!(
                "Upgrading {name}...\n{name} has been upgraded successfully."
            )),
            _ => OperationReport::err(format!("Error upgrading {name}.")),
        }
    }

    /// Raw `pip list` output, verbatim.
    pub fn list_installed(&self) -> OperationReport {
        let pip = self.resolve_pip();
        match self.runner.run(&pip, &["list"]) {
            Ok(out) if out.success => OperationReport::ok(out.stdout),
            Ok(out) => OperationReport::err(format!(
                "Error fetching installed packages: {}",
                out.stderr.trim()
            )),
            Err(e) => OperationReport::err(format!("Error fetching installed packages: {e}")),
        }
    }

    pub fn purge_cache(&self) -> OperationReport {
        let pip = self.resolve_pip();
        match self.runner.run(&pip, &["cache", "purge"]) {
            Ok(out) if out.success => OperationReport::ok(
                "Clearing pip cache...\nPip cache has been cleared successfully.",
            ),
            Ok(out) => OperationReport::err(format!(
                "Error clearing pip cache: {}",
                out.stderr.trim()
            )),
            Err(e) => OperationReport::err(format!("Error clearing pip cache: {e}")),
        }
    }

    /// `pip show <name>` exit status is the presence probe. A launch
    /// failure counts as absent; the operation that follows surfaces the
    /// real error.
    fn probe_installed(&self, pip: &str, name: &str) -> bool {
        self.runner
            .run(pip, &["show", name])
            .map(|out| out.success)
            .unwrap_or(false)
    }
}

/// Reject empty input and the untouched placeholder before anything is
/// spawned.
pub(crate) fn validate_name(name: &str) -> Result<String, OperationReport> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == NAME_PLACEHOLDER {
        return Err(OperationReport::err("Please enter a package name!"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::runner::mock::{exec_fail, exec_ok, MockRunner};
    use super::*;
    use std::fs;

    fn manager_with(
        respond: impl Fn(&str, &[&str]) -> ExecOutput + Send + Sync + 'static,
    ) -> (PipManager, Arc<MockRunner>) {
        let runner = Arc::new(MockRunner::new(respond));
        let manager = PipManager::new(runner.clone(), Platform::Posix);
        (manager, runner)
    }

    fn valid_env_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("bin")).unwrap();
        fs::write(dir.path().join("bin").join("activate"), "").unwrap();
        dir
    }

    #[test]
    fn resolve_pip_defaults_to_system_command() {
        let (manager, _) = manager_with(|_, _| exec_ok(""));
        assert_eq!(manager.resolve_pip(), "pip");
    }

    #[test]
    fn resolve_pip_uses_selected_env_per_platform() {
        for (platform, expected) in [
            (Platform::Posix, "/envs/demo/bin/pip"),
            (Platform::Windows, "/envs/demo/Scripts/pip.exe"),
        ] {
            let runner = Arc::new(MockRunner::new(|_, _| exec_ok("")));
            let manager = PipManager::new(runner, platform);
            *manager.env.lock().unwrap() = Some(PathBuf::from("/envs/demo"));
            assert_eq!(manager.resolve_pip(), expected);
        }
    }

    #[test]
    fn install_skips_when_probe_reports_installed() {
        let (manager, runner) = manager_with(|_, args| {
            assert_eq!(args[0], "show");
            exec_ok("Name: requests")
        });
        let report = manager.install("requests");
        assert!(report.success);
        assert!(report.text.contains("already installed"));
        assert_eq!(runner.count_verb("install"), 0);
    }

    #[test]
    fn install_runs_when_probe_reports_absent() {
        let (manager, runner) = manager_with(|_, args| match args[0] {
            "show" => exec_fail("not found"),
            _ => exec_ok(""),
        });
        let report = manager.install("requests");
        assert!(report.success);
        assert!(report.text.contains("has been installed successfully."));
        assert_eq!(runner.count_verb("show"), 1);
        assert_eq!(runner.count_verb("install"), 1);
    }

    #[test]
    fn install_failure_collapses_to_generic_message() {
        let (manager, _) = manager_with(|_, _| exec_fail("boom"));
        let report = manager.install("no-such-pkg");
        assert!(!report.success);
        assert_eq!(report.text, "Couldn't find or install no-such-pkg.");
    }

    #[test]
    fn uninstall_skips_when_probe_reports_absent() {
        let (manager, runner) = manager_with(|_, _| exec_fail(""));
        let report = manager.uninstall("requests");
        assert!(!report.success);
        assert!(report.text.contains("not installed or an error occurred"));
        assert_eq!(runner.count_verb("uninstall"), 0);
    }

    #[test]
    fn uninstall_passes_yes_flag() {
        let (manager, runner) = manager_with(|_, _| exec_ok(""));
        let report = manager.uninstall("requests");
        assert!(report.success);
        let calls = runner.calls.lock().unwrap();
        let uninstall = calls.iter().find(|argv| argv[1] == "uninstall").unwrap();
        assert_eq!(&uninstall[1..], ["uninstall", "requests", "-y"]);
    }

    #[test]
    fn upgrade_does_not_probe() {
        let (manager, runner) = manager_with(|_, _| exec_ok(""));
        manager.upgrade("requests");
        assert_eq!(runner.count_verb("show"), 0);
        let calls = runner.calls.lock().unwrap();
        assert_eq!(&calls[0][1..], ["install", "--upgrade", "requests"]);
    }

    #[test]
    fn blank_and_placeholder_names_are_rejected_without_any_call() {
        let (manager, runner) = manager_with(|_, _| exec_ok(""));
        for bad in ["", "   ", NAME_PLACEHOLDER] {
            for report in [
                manager.install(bad),
                manager.uninstall(bad),
                manager.upgrade(bad),
            ] {
                assert!(!report.success);
                assert_eq!(report.text, "Please enter a package name!");
            }
        }
        assert_eq!(runner.total_calls(), 0);
    }

    #[test]
    fn list_returns_stdout_verbatim() {
        let listing = "Package    Version\n----       ----\nrequests   2.31.0\n";
        let (manager, _) = manager_with(move |_, _| exec_ok(listing));
        let report = manager.list_installed();
        assert!(report.success);
        assert_eq!(report.text, listing);
    }

    #[test]
    fn create_env_refuses_existing_valid_env_without_invoking_python() {
        let dir = valid_env_dir();
        let (manager, runner) = manager_with(|_, _| exec_ok(""));
        let report = manager.create_env(dir.path().to_str().unwrap());
        assert!(!report.success);
        assert!(report.text.contains("already exists"));
        assert_eq!(runner.total_calls(), 0);
        assert!(manager.active_env().is_none());
    }

    #[test]
    fn create_env_success_selects_the_new_env() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("venv");
        let (manager, runner) = manager_with(|program, args| {
            assert_eq!(program, "python3");
            assert_eq!(args[0], "-m");
            assert_eq!(args[1], "venv");
            exec_ok("")
        });
        let report = manager.create_env(target.to_str().unwrap());
        assert!(report.success);
        assert_eq!(manager.active_env(), Some(target));
        assert_eq!(runner.total_calls(), 1);
    }

    #[test]
    fn create_env_failure_leaves_selection_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("venv");
        let (manager, _) = manager_with(|_, _| exec_fail("venv module missing"));
        let report = manager.create_env(target.to_str().unwrap());
        assert!(!report.success);
        assert!(report.text.contains("Error creating virtual environment"));
        assert!(manager.active_env().is_none());
    }

    #[test]
    fn activate_requires_valid_env() {
        let (manager, _) = manager_with(|_, _| exec_ok(""));
        let report = manager.activate_env("/nonexistent");
        assert!(!report.success);
        assert_eq!(report.text, "Invalid virtual environment path!");
        assert!(manager.active_env().is_none());

        let report = manager.activate_env("");
        assert_eq!(report.text, "No path provided!");
    }

    #[test]
    fn activate_then_deactivate_round_trip() {
        let dir = valid_env_dir();
        let (manager, _) = manager_with(|_, _| exec_ok(""));
        let report = manager.activate_env(dir.path().to_str().unwrap());
        assert!(report.success);
        assert_eq!(manager.active_env(), Some(dir.path().to_path_buf()));

        let report = manager.deactivate_env();
        assert!(report.success);
        assert!(manager.active_env().is_none());
    }

    #[test]
    fn deactivate_without_selection_fails() {
        let (manager, _) = manager_with(|_, _| exec_ok(""));
        let report = manager.deactivate_env();
        assert!(!report.success);
        assert_eq!(report.text, "No virtual environment is currently active!");
    }

    #[test]
    fn operations_use_env_pip_after_activation() {
        let dir = valid_env_dir();
        let (manager, runner) = manager_with(|_, _| exec_ok(""));
        manager.activate_env(dir.path().to_str().unwrap());
        manager.list_installed();
        let calls = runner.calls.lock().unwrap();
        let expected = dir.path().join("bin").join("pip").display().to_string();
        assert_eq!(calls[0][0], expected);
    }
}
