//! Selection artifact and run summary
//!
//! The test list is the only durable output of a run. It is rewritten from
//! scratch every time.

use crate::changes::ChangeSet;
use crate::error::{AppError, AppResult};
use crate::mapping::MappedTestSet;
use crate::selection::{MatchReason, Selection};
use crate::suite::ResolvedSuite;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

const HEADER: [&str; 2] = [
    "# Auto-generated by testscope",
    "# Source: git diff + [suites] + [mapping]",
];

/// Result of writing the test list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File written with this many tests
    Written { path: PathBuf, tests: usize },
    /// Selection was empty; nothing written
    NothingToRun,
}

/// Render the test list file body
pub fn render_test_list(selection: &Selection) -> String {
    let mut lines: Vec<&str> = HEADER.to_vec();
    lines.push("");
    lines.extend(selection.candidates().map(|c| c.as_str()));
    lines.push("");
    lines.join("\n")
}

/// Write the selection as a test list, one candidate per line
///
/// Creates missing parent directories and overwrites any existing file. An
/// empty selection writes nothing and returns [`WriteOutcome::NothingToRun`].
pub fn write_test_list(path: &Path, selection: &Selection) -> AppResult<WriteOutcome> {
    if selection.is_empty() {
        return Ok(WriteOutcome::NothingToRun);
    }

    let io_err = |source: std::io::Error| AppError::ArtifactWrite {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, render_test_list(selection)).map_err(io_err)?;

    tracing::info!(path = %path.display(), tests = selection.len(), "Test list written");
    Ok(WriteOutcome::Written {
        path: path.to_path_buf(),
        tests: selection.len(),
    })
}

/// What a run selected, for humans (`Display`) or tools (`to_json`)
#[derive(Debug, Clone, Serialize)]
pub struct SelectionSummary {
    pub repository: String,
    pub changed_files: Vec<String>,
    pub suite: ResolvedSuite,
    pub mapped_tests: Vec<String>,
    pub test_list: String,
    pub selected: usize,
    pub selected_by_suite: usize,
    pub selected_by_mapping: usize,
    pub selected_by_both: usize,
}

impl SelectionSummary {
    pub fn new(
        repository: &Path,
        changes: &ChangeSet,
        suite: &ResolvedSuite,
        mapped: &MappedTestSet,
        test_list: &Path,
        selection: &Selection,
    ) -> Self {
        Self {
            repository: repository.display().to_string(),
            changed_files: changes.iter().map(str::to_string).collect(),
            suite: suite.clone(),
            mapped_tests: mapped.iter().cloned().collect(),
            test_list: test_list.display().to_string(),
            selected: selection.len(),
            selected_by_suite: selection.count_by(MatchReason::Suite),
            selected_by_mapping: selection.count_by(MatchReason::Mapped),
            selected_by_both: selection.count_by(MatchReason::Both),
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─── Dynamic Test Selection ───")?;
        writeln!(f, "│ Repository:   {}", self.repository)?;
        writeln!(f, "│ Changed files:")?;
        if self.changed_files.is_empty() {
            writeln!(f, "│   (none)")?;
        }
        for file in &self.changed_files {
            writeln!(f, "│   {}", file)?;
        }
        let tags: Vec<&str> = self.suite.tags.iter().map(String::as_str).collect();
        writeln!(f, "│ Suite:        {} ({})", self.suite.name, tags.join(" "))?;
        if self.mapped_tests.is_empty() {
            writeln!(f, "│ Mapped tests: (none)")?;
        } else {
            writeln!(f, "│ Mapped tests: {}", self.mapped_tests.join(" "))?;
        }
        writeln!(f, "│ Test list:    {}", self.test_list)?;
        writeln!(
            f,
            "│ Selected:     {} tests (suite {}, mapped {}, both {})",
            self.selected, self.selected_by_suite, self.selected_by_mapping, self.selected_by_both
        )?;
        write!(f, "└──────────────────────────────")
    }
}
