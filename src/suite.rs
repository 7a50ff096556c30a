//! Suite resolution
//!
//! A suite is a named set of tags describing a run intent (smoke, full
//! regression). Resolving a suite turns the requested name, or the configured
//! default, into the tags a listing line must contain.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Tags a candidate must contain (any one of them) to join via the suite path
pub type RequiredTagSet = BTreeSet<String>;

/// Tag list of one suite (`[suites.definitions.<name>]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SuiteDefinition {
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Named suites plus the default one (`[suites]`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SuiteCatalog {
    pub default: String,
    #[serde(default)]
    pub definitions: BTreeMap<String, SuiteDefinition>,
}

impl SuiteCatalog {
    /// Suite names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.definitions.keys().cloned().collect()
    }
}

/// The suite a run resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSuite {
    pub name: String,
    pub tags: RequiredTagSet,
}

/// Resolve the suite for this run
///
/// A non-empty `requested` name overrides the catalog default.
///
/// # Errors
/// Returns [`AppError::UnknownSuite`] with the list of valid names when the
/// resolved name is not defined. There is no fallback: running some other
/// suite would silently drop the intended restriction.
pub fn resolve_suite(catalog: &SuiteCatalog, requested: Option<&str>) -> AppResult<ResolvedSuite> {
    let name = requested
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(catalog.default.as_str());

    let suite = catalog
        .definitions
        .get(name)
        .ok_or_else(|| AppError::UnknownSuite {
            name: name.to_string(),
            available: catalog.names(),
        })?;

    let resolved = ResolvedSuite {
        name: name.to_string(),
        tags: suite.tags.iter().cloned().collect(),
    };
    tracing::info!(suite = %resolved.name, tags = ?resolved.tags, "Suite resolved");
    Ok(resolved)
}
