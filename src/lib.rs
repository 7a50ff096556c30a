//! testscope - Change-driven end-to-end test selection
//!
//! Narrows an end-to-end run to the tests that matter for a change: tests
//! tagged for a named suite plus tests mapped, through path-pattern rules, to
//! the files that changed.

pub mod catalog;
pub mod changes;
pub mod cli;
pub mod config;
pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod runner;
pub mod selection;
pub mod suite;
pub mod telemetry;
pub mod writer;
