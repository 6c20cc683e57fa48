//! Virtual environment layout rules and validation

use std::path::{Path, PathBuf};

/// Directory layout convention of a virtual environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Activation marker relative to the environment root.
    pub fn activate_marker(&self, root: &Path) -> PathBuf {
        match self {
            Platform::Posix => root.join("bin").join("activate"),
            Platform::Windows => root.join("Scripts").join("activate"),
        }
    }

    /// pip executable inside an environment.
    pub fn pip_in_env(&self, root: &Path) -> PathBuf {
        match self {
            Platform::Posix => root.join("bin").join("pip"),
            Platform::Windows => root.join("Scripts").join("pip.exe"),
        }
    }

    /// Interpreter used to create new environments (`<python> -m venv <path>`).
    pub fn python_command(&self) -> &'static str {
        match self {
            Platform::Posix => "python3",
            Platform::Windows => "python",
        }
    }
}

/// A directory is a valid environment iff it exists and contains the
/// platform's activation marker.
pub fn is_valid_env(path: &Path, platform: Platform) -> bool {
    if !path.exists() {
        return false;
    }
    platform.activate_marker(path).exists()
}
