use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, every file was processed
/// - `Failure` (1): Command completed but some files could not be processed
/// - `Error` (2): Command failed due to internal error (config error, I/O error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Some files failed to parse or produced a tree the processor rejects.
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
