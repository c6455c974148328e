//! Report formatting and printing utilities.
//!
//! Extracted properties go to stdout, diagnostics and failures to stderr.
//! Kept apart from the core so testprops can be used as a library.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use indexmap::IndexMap;

use crate::core::{FileDiagnostic, FileFailure, Property, PropertySet, ScanReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print modules and their properties as text to stdout.
pub fn print_text(report: &ScanReport) {
    report_text_to(report, &mut io::stdout().lock());
}

/// Print the text listing to a custom writer.
///
/// ```text
/// TodoCommentCheck
///   format = FIXME:
///
/// ✓ Extracted 1 property for 1 module from 3 files
/// ```
pub fn report_text_to<W: Write>(report: &ScanReport, writer: &mut W) {
    for (index, (module, properties)) in report.modules.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(writer);
        }
        let _ = writeln!(writer, "{}", module.bold());
        for property in sorted(properties) {
            let _ = writeln!(writer, "  {} = {}", property.name.cyan(), property.value);
        }
    }

    let files = plural(report.files_scanned, "file", "files");
    let summary = if report.modules.is_empty() {
        format!(
            "Scanned {} {} - no module properties found",
            report.files_scanned, files
        )
    } else {
        let _ = writeln!(writer);
        let count = report.property_count();
        format!(
            "Extracted {} {} for {} {} from {} {}",
            count,
            plural(count, "property", "properties"),
            report.modules.len(),
            plural(report.modules.len(), "module", "modules"),
            report.files_scanned,
            files
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), summary.green());
}

/// Print modules and their properties as JSON to stdout.
pub fn print_json(report: &ScanReport) -> Result<()> {
    let json = to_json(report)?;
    let _ = writeln!(io::stdout().lock(), "{}", json);
    Ok(())
}

/// Serialize modules as an object keyed by module, properties sorted by (name, value).
pub fn to_json(report: &ScanReport) -> Result<String> {
    let modules: IndexMap<&str, Vec<&Property>> = report
        .modules
        .iter()
        .map(|(module, properties)| (module.as_str(), sorted(properties)))
        .collect();
    serde_json::to_string_pretty(&modules).context("Failed to serialize report")
}

/// Print recovered extraction failures to stderr (verbose only).
pub fn print_diagnostics(diagnostics: &[FileDiagnostic], verbose: bool) {
    print_diagnostics_to(diagnostics, verbose, &mut io::stderr().lock());
}

pub fn print_diagnostics_to<W: Write>(diagnostics: &[FileDiagnostic], verbose: bool, writer: &mut W) {
    if !verbose {
        return;
    }
    for FileDiagnostic {
        file_path,
        diagnostic,
    } in diagnostics
    {
        let _ = writeln!(
            writer,
            "{} {}:{}: {}: {}",
            "warning:".bold().yellow(),
            file_path,
            diagnostic.line,
            diagnostic.skipped,
            diagnostic.reason
        );
    }
}

/// Print files that contributed nothing because they failed.
pub fn print_failures(failures: &[FileFailure], verbose: bool) {
    print_failures_to(failures, verbose, &mut io::stderr().lock());
}

/// Verbose mode lists every failure; otherwise a single summary line is printed.
pub fn print_failures_to<W: Write>(failures: &[FileFailure], verbose: bool, writer: &mut W) {
    if failures.is_empty() {
        return;
    }

    if verbose {
        for failure in failures {
            let _ = writeln!(
                writer,
                "{} {} {}: {}: {}",
                FAILURE_MARK.red(),
                "error:".bold().red(),
                failure.file_path,
                failure.kind,
                failure.error
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be processed (use {} for details)",
            "warning:".bold().yellow(),
            failures.len(),
            "-v".cyan()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn sorted(properties: &PropertySet) -> Vec<&Property> {
    let mut sorted: Vec<&Property> = properties.iter().collect();
    sorted.sort();
    sorted
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
