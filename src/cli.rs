//! Command-line interface for testscope
//!
//! Provides argument parsing and subcommand handling for the testscope binary.
//! Every run option can also come from the environment, which is how CI jobs
//! usually drive it.

use crate::pipeline::RunSettings;
use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Change-driven end-to-end test selection
#[derive(Parser)]
#[command(name = "testscope")]
#[command(version)]
#[command(about = "Change-driven end-to-end test selection")]
#[command(
    long_about = "testscope runs only the end-to-end tests relevant to a change: tests tagged \
    for the selected suite plus tests mapped to the files that changed."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "TESTSCOPE_CONFIG",
        default_value = "testscope.toml",
        global = true
    )]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Select tests for the current change and run them
    Run(RunArgs),

    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Options for `testscope run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Repository to diff
    #[arg(long = "repo", env = "TARGET_REPO_PATH", default_value = "..")]
    pub repo_path: PathBuf,

    /// Explicit diff range, e.g. `origin/main...HEAD`
    ///
    /// Without it, unstaged, staged, and last-commit changes are combined.
    #[arg(long, env = "DIFF_RANGE")]
    pub diff_range: Option<String>,

    /// Suite to run instead of the configured default
    #[arg(long, env = "SUITE")]
    pub suite: Option<String>,

    /// Write the test list but do not execute it
    ///
    /// `DRY_RUN` is read leniently: `0`, `false`, `no`, `off`, and empty
    /// disable it, any other value enables it.
    #[arg(long, env = "DRY_RUN", value_parser = FalseyValueParser::new())]
    pub dry_run: bool,

    /// Where to write the generated test list
    #[arg(
        long,
        env = "TEST_LIST_FILE",
        default_value = ".tmp/dynamic-test-list.txt"
    )]
    pub test_list_file: PathBuf,

    /// Print the selection summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Extra arguments forwarded to the test runner (after --)
    #[arg(last = true)]
    pub runner_args: Vec<String>,
}

impl From<RunArgs> for RunSettings {
    fn from(args: RunArgs) -> Self {
        Self {
            repo_path: args.repo_path,
            diff_range: args.diff_range,
            suite: args.suite,
            dry_run: args.dry_run,
            test_list_file: args.test_list_file,
            json: args.json,
            runner_args: args.runner_args,
        }
    }
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# testscope Configuration
# ========================
#
# Suites, change-to-test mapping rules, and the test runner command used to
# narrow end-to-end runs to the tests a change actually touches.

# ─────────────────────────────────────────────────────────────────────────────
# SUITES
# ─────────────────────────────────────────────────────────────────────────────
#
# A suite is a named set of tags. A test joins the run when its listing line
# contains any of the suite's tags verbatim. Override the default per run with
# --suite or the SUITE environment variable.

[suites]
default = "smoke"

[suites.definitions.smoke]
tags = ["@smoke"]

[suites.definitions.regression]
tags = ["@smoke", "@regression"]

# A suite without tags runs only the tests mapped from changed files.
[suites.definitions.changed]
tags = []

# ─────────────────────────────────────────────────────────────────────────────
# MAPPING RULES
# ─────────────────────────────────────────────────────────────────────────────
#
# Each rule maps changed paths to test ids. `pattern` is an unanchored regular
# expression matched against every changed path; all matching rules add their
# tests. Test ids must appear as whole tokens in the test title.

[[mapping.rules]]
pattern = "src/pages/UsersPage\\."
tests = ["TC_USERS_CREATE"]

[[mapping.rules]]
pattern = "src/pages/ProductsPage\\."
tests = ["TC_PRODUCTS_ORDER"]

[[mapping.rules]]
pattern = "src/components/"
tests = ["TC_USERS_CREATE", "TC_PRODUCTS_ORDER"]

# ─────────────────────────────────────────────────────────────────────────────
# TEST RUNNER
# ─────────────────────────────────────────────────────────────────────────────
#
# Listing runs:   <program> <args..> <list_flag> <extra..>
# Execution runs: <program> <args..> <test_list_flag> <file> <extra..>

[runner]
program = "npx"
args = ["playwright", "test"]
list_flag = "--list"
test_list_flag = "--test-list"

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG overrides)
log_level = "info"
"#
}
