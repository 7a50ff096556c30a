//! Change-to-test mapping
//!
//! Maps changed file paths to test identifiers through ordered pattern rules.
//! A rule pattern is an unanchored regular expression: `UsersPage\.` matches
//! any path containing that text anywhere.

use crate::changes::ChangeSet;
use crate::error::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Test identifiers selected by the change set
pub type MappedTestSet = BTreeSet<String>;

/// Association between a path pattern and the tests it covers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappingRule {
    pub pattern: String,
    #[serde(default)]
    pub tests: Vec<String>,
}

impl MappingRule {
    pub fn new(pattern: impl Into<String>, tests: &[&str]) -> Self {
        Self {
            pattern: pattern.into(),
            tests: tests.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Ordered list of mapping rules (`[[mapping.rules]]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappingTable {
    #[serde(default)]
    pub rules: Vec<MappingRule>,
}

/// Mapping table with every pattern compiled
#[derive(Debug)]
pub struct CompiledMapping<'a> {
    rules: Vec<(Regex, &'a MappingRule)>,
}

impl<'a> CompiledMapping<'a> {
    /// Compile all rule patterns
    ///
    /// # Errors
    /// Returns [`AppError::InvalidPattern`] naming the first pattern that
    /// fails to compile. A bad rule is never skipped, since ignoring it would
    /// silently drop the tests it maps.
    pub fn compile(table: &'a MappingTable) -> AppResult<Self> {
        let rules = table
            .rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|regex| (regex, rule))
                    .map_err(|source| AppError::InvalidPattern {
                        pattern: rule.pattern.clone(),
                        source,
                    })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Union the tests of every rule matching any changed path
    pub fn resolve(&self, changes: &ChangeSet) -> MappedTestSet {
        let mut tests = MappedTestSet::new();

        for file in changes.iter() {
            for (regex, rule) in &self.rules {
                if regex.is_match(file) {
                    tracing::debug!(
                        file = file,
                        pattern = %rule.pattern,
                        tests = ?rule.tests,
                        "Mapping rule matched"
                    );
                    tests.extend(rule.tests.iter().cloned());
                }
            }
        }

        tests
    }
}

/// Resolve the mapped test identifiers for a change set
///
/// No match is a valid outcome and yields an empty set.
pub fn resolve_mapped_tests(table: &MappingTable, changes: &ChangeSet) -> AppResult<MappedTestSet> {
    let mapped = CompiledMapping::compile(table)?.resolve(changes);
    tracing::info!(mapped_tests = mapped.len(), "Mapped tests resolved");
    Ok(mapped)
}
