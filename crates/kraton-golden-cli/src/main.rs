// crates/kraton-golden-cli/src/main.rs
// ============================================================================
// Module: Golden Harness CLI
// Description: CLI entrypoint for checking generated outputs against goldens.
// Purpose: Run golden-file cases per module and report the outcome.
// Dependencies: clap, kraton-golden
// ============================================================================

//! ## Overview
//! `kraton-golden check` discovers every case of the selected modules, runs
//! each case once, prints one line per case and a summary, and exits with a
//! failure code when any case failed. `kraton-golden list` prints the cases
//! without running them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use kraton_golden::CaseStatus;
use kraton_golden::EventSink;
use kraton_golden::GoldenError;
use kraton_golden::HarnessConfig;
use kraton_golden::ModuleLayout;
use kraton_golden::ModuleSuite;
use kraton_golden::RunReport;
use kraton_golden::discover_module;
use kraton_golden::discover_modules;
use kraton_golden::run_suite;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Golden harness CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "kraton-golden", about = "Check Kraton generator outputs against golden files.")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run every golden-file case and report failures.
    Check {
        /// Module selection and configuration.
        #[command(flatten)]
        target: TargetArgs,
        /// JSON report destination (overrides `report.path`).
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// List discovered cases without running them.
    List {
        /// Module selection and configuration.
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Arguments shared by all subcommands.
#[derive(Debug, Args)]
struct TargetArgs {
    /// Configuration file (defaults to `kraton-golden.toml`).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Project root (overrides `project.root`).
    #[arg(long, value_name = "DIR")]
    project_root: Option<PathBuf>,
    /// Module to check; repeat for several modules.
    #[arg(long = "module", value_name = "ID")]
    modules: Vec<String>,
}

// ============================================================================
// SECTION: CLI Execution
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => report_error(&err),
    }
}

/// Executes the CLI command, returning whether every case passed.
fn run() -> Result<bool, GoldenError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            target,
            report,
        } => {
            let harness = Harness::load(&target)?;
            let report_path = report.or_else(|| harness.config.report.path.clone());
            harness.check(report_path.as_deref())
        }
        Command::List {
            target,
        } => {
            let harness = Harness::load(&target)?;
            harness.list()?;
            Ok(true)
        }
    }
}

/// Reports CLI errors to stderr and returns a failure exit code.
fn report_error(err: &GoldenError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{err}");
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Resolved configuration, event sink, and module layouts for one run.
struct Harness {
    /// Loaded configuration.
    config: HarnessConfig,
    /// Event sink selected by the logging configuration.
    sink: Box<dyn EventSink>,
    /// Layouts of the selected modules, in run order.
    layouts: Vec<ModuleLayout>,
}

impl Harness {
    /// Loads configuration and resolves the modules to run.
    fn load(target: &TargetArgs) -> Result<Self, GoldenError> {
        let config = HarnessConfig::load(target.config.as_deref())?;
        let sink = config.logging.open_sink()?;
        let root = target.project_root.clone().unwrap_or_else(|| config.project.root.clone());
        let modules = if !target.modules.is_empty() {
            target.modules.clone()
        } else if !config.project.modules.is_empty() {
            config.project.modules.clone()
        } else {
            discover_modules(&root, &config.project)?
        };
        let layouts = modules
            .iter()
            .map(|module| ModuleLayout::new(&root, module, &config.project))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            config,
            sink,
            layouts,
        })
    }

    /// Discovers the suite of every selected module.
    fn suites(&self) -> impl Iterator<Item = ModuleSuite> + '_ {
        self.layouts.iter().map(|layout| discover_module(layout, self.sink.as_ref()))
    }

    /// Runs every case, prints the outcome, and optionally writes the report.
    fn check(&self, report_path: Option<&Path>) -> Result<bool, GoldenError> {
        let mut report = RunReport::new();
        let mut stdout = std::io::stdout().lock();
        for suite in self.suites() {
            let results = run_suite(&suite, self.sink.as_ref());
            for case in &results.cases {
                let written = match (&case.status, &case.message) {
                    (CaseStatus::Failed, Some(message)) => {
                        writeln!(stdout, "FAILED {}/{}: {message}", results.module, case.name)
                    }
                    (CaseStatus::Failed, None) => {
                        writeln!(stdout, "FAILED {}/{}", results.module, case.name)
                    }
                    (CaseStatus::Passed, _) => {
                        writeln!(stdout, "ok {}/{}", results.module, case.name)
                    }
                };
                written.map_err(output_error)?;
            }
            report.push(results);
        }
        let summary = report.summary;
        writeln!(
            stdout,
            "{} passed, {} failed, {} total",
            summary.passed, summary.failed, summary.total
        )
        .map_err(output_error)?;
        if let Some(path) = report_path {
            report.write_json(path)?;
        }
        Ok(report.is_success())
    }

    /// Prints every discovered case with its classification.
    fn list(&self) -> Result<(), GoldenError> {
        let mut stdout = std::io::stdout().lock();
        for suite in self.suites() {
            for case in &suite.cases {
                let label = case.classification().map_or("setup", |kind| kind.as_str());
                writeln!(stdout, "{}/{} [{label}]", suite.module, case.name())
                    .map_err(output_error)?;
            }
        }
        Ok(())
    }
}

/// Maps a stdout write failure into a harness error.
fn output_error(err: std::io::Error) -> GoldenError {
    GoldenError::Io(format!("failed to write output: {err}"))
}
