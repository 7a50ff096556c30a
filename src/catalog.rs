//! Test catalog listing adapter
//!
//! Turns the test runner's list output into candidate lines. Selection only
//! ever looks at the rendered text of a line, so a structured listing format
//! can replace this module without touching [`crate::selection`].

use serde::Serialize;
use std::fmt;

/// Leading summary line printed by the runner's list mode
const SUMMARY_PREFIX: &str = "Listing tests:";
/// Trailing count line printed by the runner's list mode
const TOTAL_PREFIX: &str = "Total:";
/// Hierarchy separators between project, file, and title, in preference order
const SEPARATORS: [char; 2] = ['›', '>'];

/// One discoverable test as rendered by the runner
///
/// Opaque text carrying the file, the title, and any inline tags or test
/// identifiers, e.g. `checkout.spec.ts › place order TC_PRODUCTS_ORDER @smoke`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidateTest(String);

impl CandidateTest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CandidateTest {
    fn from(line: &str) -> Self {
        Self(line.to_string())
    }
}

impl From<String> for CandidateTest {
    fn from(line: String) -> Self {
        Self(line)
    }
}

impl fmt::Display for CandidateTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse list-mode output into candidate lines
///
/// Drops the summary and count lines, blank lines, and anything without a
/// hierarchy separator. Kept lines are normalised: a leading `[project]`
/// segment is removed and the `:line:col` locator is stripped from the file,
/// so `[chromium] › a.spec.ts:1:1 › t1 @smoke` becomes `a.spec.ts › t1 @smoke`.
/// Everything after the file segment is left untouched.
pub fn parse_list_output(output: &str) -> Vec<CandidateTest> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with(SUMMARY_PREFIX) && !line.starts_with(TOTAL_PREFIX))
        .filter_map(|line| {
            let separator = SEPARATORS.into_iter().find(|sep| line.contains(*sep))?;
            Some(normalise(line, separator))
        })
        .collect()
}

fn normalise(line: &str, separator: char) -> CandidateTest {
    let rest = strip_project(line, separator);

    // Only the file segment is rewritten; the title is kept byte for byte
    let file_end = rest.find(separator).unwrap_or(rest.len());
    let file = rest[..file_end].trim_end();
    let title = &rest[file.len()..];

    CandidateTest(format!("{}{}", strip_location(file), title))
}

/// Drop a leading `[project] <sep>` segment
fn strip_project(line: &str, separator: char) -> &str {
    let Some((head, rest)) = line.split_once(separator) else {
        return line;
    };
    let head = head.trim();
    if head.len() > 1 && head.starts_with('[') && head.ends_with(']') {
        rest.trim_start()
    } else {
        line
    }
}

/// Strip a trailing `:<line>:<col>` from a file locator
fn strip_location(file: &str) -> &str {
    let mut parts = file.rsplitn(3, ':');
    let (Some(col), Some(line), Some(path)) = (parts.next(), parts.next(), parts.next()) else {
        return file;
    };

    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if numeric(col) && numeric(line) && !path.is_empty() {
        path
    } else {
        file
    }
}
