//! monorelease - Monorepo release automation library
//!
//! This library provides the release workflow for a multi-package
//! JavaScript workspace:
//! - Target version resolution (explicit or interactive)
//! - Version propagation across every package.json
//! - A single release commit
//! - Sequential publishing of every public package
//! - Dry-run mode that logs external commands instead of running them

pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod publish;
pub mod runner;
pub mod vcs;
pub mod version;
pub mod workspace;
