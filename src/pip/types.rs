//! Data types shared by the pip operation layer

/// Placeholder shown in the package-name input while it is empty. Treated as
/// "no input" everywhere a package name is required.
pub const NAME_PLACEHOLDER: &str = "Enter package name...";

/// Captured output of a finished external command.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Outcome of one user-initiated operation: the text that goes into the
/// output log, plus the flag deciding between the info and error dialog.
#[derive(Debug, Clone)]
pub struct OperationReport {
    pub text: String,
    pub success: bool,
}

impl OperationReport {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    pub fn err(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }
}
