use std::{
    collections::BTreeSet,
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        aggregate::ModuleProperties,
        file_scanner::scan_files,
        parsers::java::parse_java_source,
        processor::{Diagnostic, UnitTestProcessor},
        walker::walk_tree,
    },
};

/// Why a file contributed nothing to the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Read,
    Parse,
    /// The tree walker delivered a node the processor does not accept.
    Contract,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Read => "read error",
            FailureKind::Parse => "parse error",
            FailureKind::Contract => "unsupported tree",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_path: String,
    pub kind: FailureKind,
    pub error: String,
}

/// A recovered extraction failure, located in its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostic {
    pub file_path: String,
    pub diagnostic: Diagnostic,
}

/// Everything one scan produced.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Drained accumulation: module → properties, in discovery order.
    pub modules: ModuleProperties,
    pub files_scanned: usize,
    pub failures: Vec<FileFailure>,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl ScanReport {
    pub fn property_count(&self) -> usize {
        self.modules.values().map(|properties| properties.len()).sum()
    }
}

/// Scan context: configuration plus the files to process.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--base-path`)
/// 2. `.testpropsrc.json` config file
/// 3. Built-in defaults
pub struct ScanContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Java sources to process, in processing order.
    pub files: BTreeSet<String>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,
}

impl ScanContext {
    /// Load configuration and discover source files.
    ///
    /// # Errors
    ///
    /// Returns error if the root path is not valid UTF-8 or the config file is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        let root_dir = common_args
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(Path::new(path))?;
        if verbose && !config_result.from_file {
            eprintln!("Note: No {} found, using default configuration", CONFIG_FILE_NAME);
        }

        let mut config = config_result.config;
        if let Some(ref base_path) = common_args.base_path {
            config.base_path = base_path.clone();
        }

        let scan_result = scan_files(path, &config.includes, &config.ignores, verbose);
        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
        })
    }

    /// Process every file in order through one processor and drain the result.
    ///
    /// A file that cannot be read or parsed, or whose tree the processor
    /// rejects, is recorded as a failure; the remaining files are still processed.
    pub fn run(&self) -> ScanReport {
        let mut processor = UnitTestProcessor::new(self.config.base_path.as_str());
        let mut report = ScanReport::default();

        for file_path in &self.files {
            if self.verbose {
                eprintln!("Scanning file: {}", file_path);
            }
            report.files_scanned += 1;

            if let Err(failure) = process_file(&mut processor, file_path) {
                report.failures.push(failure);
            }
            report
                .diagnostics
                .extend(processor.take_diagnostics().into_iter().map(|diagnostic| {
                    FileDiagnostic {
                        file_path: file_path.clone(),
                        diagnostic,
                    }
                }));
        }

        report.modules = processor.drain();
        report
    }
}

fn process_file(processor: &mut UnitTestProcessor, file_path: &str) -> Result<(), FileFailure> {
    let failure = |kind: FailureKind, error: String| FileFailure {
        file_path: file_path.to_owned(),
        kind,
        error,
    };

    let source = fs::read_to_string(file_path).map_err(|e| failure(FailureKind::Read, e.to_string()))?;
    let tree = parse_java_source(&source).map_err(|e| failure(FailureKind::Parse, e.to_string()))?;
    walk_tree(&tree, processor).map_err(|e| failure(FailureKind::Contract, e.to_string()))
}
