//! # git-commit-mklog
//!
//! A `git commit` wrapper for the `git commit-mklog` alias.
//!
//! The wrapper recognizes two flags of its own, `-b/--pr-numbers` and
//! `-p/--fill-up-bug-titles`, encodes them into `GCC_MKLOG_ARGS`, forces the
//! ChangeLog hook on with `GCC_FORCE_MKLOG=1`, and hands every other argument
//! to `git commit` through the shell.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use git_commit_mklog::utils::Settings;
//! use git_commit_mklog::{CommitLogInvoker, ParsedOptions};
//!
//! let options = ParsedOptions::try_parse_from(["git-commit-mklog", "-b", "123", "--amend"])?;
//! let invocation = CommitLogInvoker::new(Settings::default()).prepare(&options, &BTreeMap::new());
//!
//! assert_eq!(invocation.command_line.to_string(), "git commit --amend");
//! assert_eq!(
//!     invocation.environment.get("GCC_MKLOG_ARGS"),
//!     Some(std::ffi::OsStr::new("-b 123"))
//! );
//! # Ok::<(), clap::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod error;
pub mod mklog;
pub mod utils;

pub use crate::cli::{Cli, ParsedOptions};
pub use crate::error::MklogError;
pub use crate::mklog::CommitLogInvoker;

/// The current version of git-commit-mklog.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
