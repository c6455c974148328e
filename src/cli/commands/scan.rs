use anyhow::Result;

use super::super::{
    args::{OutputFormat, ScanCommand},
    exit_status::ExitStatus,
    report,
};
use crate::core::ScanContext;

pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let ctx = ScanContext::new(&cmd.common)?;
    let result = ctx.run();

    match cmd.format {
        OutputFormat::Text => report::print_text(&result),
        OutputFormat::Json => report::print_json(&result)?,
    }

    report::print_diagnostics(&result.diagnostics, verbose);
    report::print_failures(&result.failures, verbose);

    if result.failures.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
