//! Test selection engine
//!
//! Combines the catalog, the suite's required tags, and the mapped test
//! identifiers into the final selection.
//!
//! # Matching
//! - Tags match as plain substrings of a candidate line.
//! - Test identifiers match as bounded tokens: the identifier must sit
//!   between non-word characters or the ends of the line, so
//!   `TC_PRODUCTS_ORDER` does not pick up `TC_PRODUCTS_ORDER_EXTENDED`.
//!   Identifiers are escaped here, and only here, before being embedded in a
//!   pattern.
//!
//! The output keeps catalog order and lists each candidate at most once.

use crate::catalog::CandidateTest;
use crate::error::{AppError, AppResult};
use crate::mapping::MappedTestSet;
use crate::suite::RequiredTagSet;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// ASCII word characters; anything else bounds an identifier
const NON_WORD: &str = "[^0-9A-Za-z_]";

/// Why a candidate was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchReason {
    /// Carries one of the suite's tags
    Suite,
    /// Mentions a mapped test identifier
    Mapped,
    /// Both of the above
    Both,
}

impl MatchReason {
    fn from_hits(hit_suite: bool, hit_mapped: bool) -> Option<Self> {
        match (hit_suite, hit_mapped) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Suite),
            (false, true) => Some(Self::Mapped),
            (false, false) => None,
        }
    }
}

/// A selected candidate and the reason it was kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedTest {
    pub candidate: CandidateTest,
    pub reason: MatchReason,
}

/// Ordered, duplicate-free subset of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    tests: Vec<SelectedTest>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn tests(&self) -> &[SelectedTest] {
        &self.tests
    }

    /// Selected candidates in catalog order
    pub fn candidates(&self) -> impl Iterator<Item = &CandidateTest> {
        self.tests.iter().map(|t| &t.candidate)
    }

    /// Number of selected tests kept for the given reason
    pub fn count_by(&self, reason: MatchReason) -> usize {
        self.tests.iter().filter(|t| t.reason == reason).count()
    }
}

/// Matcher built from one run's tags and mapped identifiers
#[derive(Debug)]
pub struct SelectionEngine<'a> {
    tags: &'a RequiredTagSet,
    id_patterns: Vec<Regex>,
}

impl<'a> SelectionEngine<'a> {
    /// Build bounded matchers for every mapped identifier
    ///
    /// # Errors
    /// Returns [`AppError::InvalidPattern`] if a bounded pattern fails to
    /// compile, which only happens for identifiers exceeding the regex size
    /// limit.
    pub fn new(tags: &'a RequiredTagSet, mapped: &MappedTestSet) -> AppResult<Self> {
        let id_patterns = mapped
            .iter()
            .map(|id| {
                let pattern = format!(
                    "(?:^|{nw}){id}(?:$|{nw})",
                    nw = NON_WORD,
                    id = regex::escape(id)
                );
                Regex::new(&pattern).map_err(|source| AppError::InvalidPattern { pattern, source })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { tags, id_patterns })
    }

    fn hit_suite(&self, line: &str) -> bool {
        !self.tags.is_empty() && self.tags.iter().any(|tag| line.contains(tag.as_str()))
    }

    fn hit_mapped(&self, line: &str) -> bool {
        self.id_patterns.iter().any(|re| re.is_match(line))
    }

    /// Select candidates in catalog order
    ///
    /// Candidates repeated in the catalog are kept once, at their first
    /// position.
    pub fn select(&self, candidates: &[CandidateTest]) -> Selection {
        let mut tests: Vec<SelectedTest> = Vec::new();
        let mut seen: HashSet<&CandidateTest> = HashSet::new();

        for candidate in candidates {
            let line = candidate.as_str();
            let Some(reason) = MatchReason::from_hits(self.hit_suite(line), self.hit_mapped(line))
            else {
                continue;
            };

            if !seen.insert(candidate) {
                continue;
            }

            tracing::debug!(test = line, reason = ?reason, "Selected test");
            tests.push(SelectedTest {
                candidate: candidate.clone(),
                reason,
            });
        }

        Selection { tests }
    }
}

/// Select tests from the catalog by suite tags and mapped identifiers
///
/// Empty tags and an empty mapped set select nothing; that is a normal
/// outcome, not an error.
pub fn select_tests(
    candidates: &[CandidateTest],
    tags: &RequiredTagSet,
    mapped: &MappedTestSet,
) -> AppResult<Selection> {
    let selection = SelectionEngine::new(tags, mapped)?.select(candidates);
    tracing::info!(
        candidates = candidates.len(),
        selected = selection.len(),
        "Selection complete"
    );
    Ok(selection)
}
