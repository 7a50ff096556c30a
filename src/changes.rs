//! Changed-file collection
//!
//! Gathers the set of paths that differ in the target repository, either
//! across an explicit comparison range or as the union of unstaged changes,
//! staged changes, and the most recent commit.
//!
//! Collection is best-effort: a source that fails contributes nothing instead
//! of aborting the run. Narrowing the test selection with partial information
//! is preferable to not selecting at all.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::Command;

/// One place changed paths can come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    /// Working-tree changes not yet staged
    Unstaged,
    /// Changes staged in the index
    Staged,
    /// The most recent commit against its parent
    LastCommit,
    /// An explicit comparison range such as `origin/main...HEAD`
    Range(String),
}

impl ChangeSource {
    /// The sources unioned when no explicit range is given
    pub fn implicit() -> [ChangeSource; 3] {
        [Self::Unstaged, Self::Staged, Self::LastCommit]
    }
}

/// What a single source contributed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Paths(Vec<String>),
    Empty,
}

impl SourceOutcome {
    /// Build an outcome from raw `--name-only` output
    pub fn from_output(output: &str) -> Self {
        let paths: Vec<String> = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if paths.is_empty() {
            Self::Empty
        } else {
            Self::Paths(paths)
        }
    }

    fn into_paths(self) -> Vec<String> {
        match self {
            Self::Paths(paths) => paths,
            Self::Empty => Vec::new(),
        }
    }
}

/// Supplies changed paths for a source
///
/// Implementations must not fail: any error is reported as
/// [`SourceOutcome::Empty`].
pub trait ChangeSetProvider {
    fn diff(&self, source: &ChangeSource) -> SourceOutcome;
}

/// Sorted, duplicate-free set of changed paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(BTreeSet<String>);

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Paths in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Collect the change set for a run
///
/// A non-empty `range` selects exactly the files differing across that range.
/// Otherwise unstaged, staged, and last-commit changes are unioned. The result
/// is independent of the order in which sources report.
pub fn collect<P: ChangeSetProvider + ?Sized>(provider: &P, range: Option<&str>) -> ChangeSet {
    let sources = match range.map(str::trim).filter(|r| !r.is_empty()) {
        Some(range) => vec![ChangeSource::Range(range.to_string())],
        None => ChangeSource::implicit().to_vec(),
    };

    let changes: ChangeSet = sources
        .iter()
        .flat_map(|source| {
            let outcome = provider.diff(source);
            if let SourceOutcome::Paths(paths) = &outcome {
                tracing::debug!(source = ?source, count = paths.len(), "Collected changed paths");
            }
            outcome.into_paths()
        })
        .collect();

    tracing::info!(changed_files = changes.len(), "Change set collected");
    changes
}

/// Git-backed provider running `git diff --name-only`
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
    program: String,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run git in the target repository and return stdout on success
    ///
    /// Paths are printed verbatim (`core.quotePath=false`) so non-ASCII names
    /// reach the mapping rules as written.
    fn git(&self, args: &[&str]) -> Result<String, String> {
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(&self.repo)
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .output()
            .map_err(|e| format!("failed to spawn {}: {}", self.program, e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
        }
    }

    fn has_parent_commit(&self) -> bool {
        self.git(&["rev-parse", "--verify", "--quiet", "HEAD~1"])
            .is_ok()
    }
}

impl ChangeSetProvider for GitCli {
    fn diff(&self, source: &ChangeSource) -> SourceOutcome {
        let result = match source {
            ChangeSource::Unstaged => self.git(&["diff", "--name-only"]),
            ChangeSource::Staged => self.git(&["diff", "--name-only", "--cached"]),
            ChangeSource::LastCommit => {
                if !self.has_parent_commit() {
                    tracing::debug!(repo = %self.repo.display(), "HEAD has no parent, skipping last commit");
                    return SourceOutcome::Empty;
                }
                self.git(&["diff", "--name-only", "HEAD~1", "HEAD"])
            }
            ChangeSource::Range(range) => {
                let mut args = vec!["diff", "--name-only"];
                args.extend(range.split_whitespace());
                self.git(&args)
            }
        };

        match result {
            Ok(output) => SourceOutcome::from_output(&output),
            Err(reason) => {
                tracing::warn!(
                    source = ?source,
                    repo = %self.repo.display(),
                    reason = %reason,
                    "Diff source failed, treating as empty"
                );
                SourceOutcome::Empty
            }
        }
    }
}
