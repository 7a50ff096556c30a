//! Configuration management for testscope
//!
//! Parses TOML configuration files holding the suite catalog, the mapping
//! rules, the test runner command, and observability settings.

use crate::error::{AppError, AppResult};
use crate::mapping::{CompiledMapping, MappingTable};
use crate::suite::SuiteCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub suites: SuiteCatalog,
    #[serde(default)]
    pub mapping: MappingTable,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Test runner command line
///
/// Listing runs `<program> <args..> <list_flag> <passthrough..>`; execution
/// runs `<program> <args..> <test_list_flag> <file> <passthrough..>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    #[serde(default = "default_program")]
    program: String,
    #[serde(default = "default_args")]
    args: Vec<String>,
    #[serde(default = "default_list_flag")]
    list_flag: String,
    #[serde(default = "default_test_list_flag")]
    test_list_flag: String,
}

impl RunnerConfig {
    /// Executable to spawn
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before any mode flag
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Flag switching the runner into list (dry-run) mode
    pub fn list_flag(&self) -> &str {
        &self.list_flag
    }

    /// Flag pointing the runner at the generated test list
    pub fn test_list_flag(&self) -> &str {
        &self.test_list_flag
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            list_flag: default_list_flag(),
            test_list_flag: default_test_list_flag(),
        }
    }
}

fn default_program() -> String {
    "npx".to_string()
}

fn default_args() -> Vec<String> {
    vec!["playwright".to_string(), "test".to_string()]
}

fn default_list_flag() -> String {
    "--list".to_string()
}

fn default_test_list_flag() -> String {
    "--test-list".to_string()
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        // Phase 1: Read file (preserves io::Error context)
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            })?;

        // Phase 2: Parse TOML (preserves toml::de::Error context)
        let config: Self = toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
            path: path_display.clone(),
            source,
        })?;

        // Phase 3: Validate parsed config
        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        tracing::debug!(
            suites = config.suites.definitions.len(),
            rules = config.mapping.rules.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration after parsing
    ///
    /// Called by `from_file()` and `from_str()`. Configs built directly through
    /// serde skip it; the resolvers still fail on unknown suites and bad
    /// patterns at run time.
    pub fn validate(&self) -> AppResult<()> {
        if self.suites.default.trim().is_empty() {
            return Err(AppError::Config(
                "suites.default must name a suite, got an empty string".to_string(),
            ));
        }

        if !self.suites.definitions.contains_key(&self.suites.default) {
            return Err(AppError::Config(format!(
                "suites.default is \"{}\" but no such suite is defined. Available suites: {}",
                self.suites.default,
                self.suites.names().join(", ")
            )));
        }

        // An empty tag is a substring of every line and would select the whole catalog
        for (name, suite) in &self.suites.definitions {
            if suite.tags.iter().any(|tag| tag.trim().is_empty()) {
                return Err(AppError::Config(format!(
                    "Suite \"{}\" contains an empty tag. Tags must be non-empty, e.g. \"@smoke\".",
                    name
                )));
            }
        }

        for rule in &self.mapping.rules {
            if rule.tests.iter().any(|test| test.trim().is_empty()) {
                return Err(AppError::Config(format!(
                    "Mapping rule \"{}\" contains an empty test id",
                    rule.pattern
                )));
            }
        }
        CompiledMapping::compile(&self.mapping)?;

        if self.runner.program.trim().is_empty() {
            return Err(AppError::Config(
                "runner.program must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
            path: "<string>".to_string(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }
}
