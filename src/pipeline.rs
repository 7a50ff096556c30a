//! End-to-end selection run
//!
//! collect changes → resolve suite → resolve mapped tests → list catalog →
//! select → write test list → report → execute. Each step completes before
//! the next starts; nothing is shared between runs.

use crate::catalog::parse_list_output;
use crate::changes::{self, ChangeSetProvider};
use crate::config::Config;
use crate::error::AppResult;
use crate::mapping::resolve_mapped_tests;
use crate::runner::TestRunner;
use crate::selection::select_tests;
use crate::suite::resolve_suite;
use crate::writer::{SelectionSummary, WriteOutcome, write_test_list};
use std::io::Write;
use std::path::PathBuf;

/// Per-run settings from the command line and environment
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Repository whose changes drive the selection (reported only; the
    /// change-set provider is already bound to it)
    pub repo_path: PathBuf,
    /// Explicit comparison range; `None` or blank unions the implicit sources
    pub diff_range: Option<String>,
    /// Suite name overriding the configured default
    pub suite: Option<String>,
    /// Select and write the test list without executing it
    pub dry_run: bool,
    /// Where the test list is written
    pub test_list_file: PathBuf,
    /// Print the summary as JSON instead of the boxed text block
    pub json: bool,
    /// Arguments forwarded to both runner invocations
    pub runner_args: Vec<String>,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing matched; no file was written and nothing was run
    NothingSelected,
    /// Test list written, execution skipped
    DryRun { selected: usize },
    /// Runner executed with this exit code
    Executed { selected: usize, exit_code: i32 },
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NothingSelected | Self::DryRun { .. } => 0,
            Self::Executed { exit_code, .. } => *exit_code,
        }
    }
}

/// Run the selection pipeline, writing the report to `out`
pub fn run<P, R, W>(
    settings: &RunSettings,
    config: &Config,
    provider: &P,
    runner: &R,
    out: &mut W,
) -> AppResult<RunOutcome>
where
    P: ChangeSetProvider + ?Sized,
    R: TestRunner + ?Sized,
    W: Write,
{
    let changes = changes::collect(provider, settings.diff_range.as_deref());
    let suite = resolve_suite(&config.suites, settings.suite.as_deref())?;
    let mapped = resolve_mapped_tests(&config.mapping, &changes)?;

    let listing = runner.list(&settings.runner_args)?;
    let candidates = parse_list_output(&listing);
    tracing::info!(candidates = candidates.len(), "Catalog listed");

    let selection = select_tests(&candidates, &suite.tags, &mapped)?;
    let selected = match write_test_list(&settings.test_list_file, &selection)? {
        WriteOutcome::NothingToRun => {
            report(out, "No tests selected. Exiting.");
            return Ok(RunOutcome::NothingSelected);
        }
        WriteOutcome::Written { tests, .. } => tests,
    };

    let summary = SelectionSummary::new(
        &settings.repo_path,
        &changes,
        &suite,
        &mapped,
        &settings.test_list_file,
        &selection,
    );
    if settings.json {
        report(out, &summary.to_json()?);
    } else {
        report(out, &summary.to_string());
    }

    if settings.dry_run {
        if !settings.json {
            report(out, "Dry run: skipping test execution");
        }
        return Ok(RunOutcome::DryRun { selected });
    }

    let exit_code = runner.execute(&settings.test_list_file, &settings.runner_args)?;
    if exit_code != 0 {
        tracing::warn!(exit_code, "Test runner reported failure");
    }
    Ok(RunOutcome::Executed {
        selected,
        exit_code,
    })
}

/// Print a report line. Write failures are logged, not propagated.
fn report<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = writeln!(out, "{}", text) {
        tracing::warn!(error = %e, "Failed to write report");
    }
}
