//! # gitlint
//!
//! Lints git commit messages.
//!
//! A [`CommitSource`](commits::CommitSource) produces commits, either from a
//! repository's history or from a single pending message. Filter stages
//! narrow the sequence, [`Rule`](issues::Rule)s turn each remaining commit
//! into issues, and a [`Reporter`](report::Reporter) writes them out.
//!
//! ## Quick Start
//!
//! ```rust
//! use gitlint::commits::{CommitSource, CommitSourceExt, MessageCommits, MessageInput};
//! use gitlint::issues::{self, SubjectMaxLength};
//! use gitlint::report::Reporter;
//!
//! # fn main() -> anyhow::Result<()> {
//! let source = MessageCommits::new(MessageInput::Text("A rather long subject line".into()))
//!     .with_max_parents(1);
//! let found = issues::collect(&[SubjectMaxLength(10)], &source)?;
//! let report = Reporter::new("\n").render(&found)?;
//! assert_eq!(report, "fakehsh: subject length exceeds max [10]\n");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commits;
pub mod config;
pub mod error;
pub mod git;
pub mod issues;
pub mod lint;
pub mod report;

pub use crate::cli::Cli;
pub use crate::error::LintError;

/// The current version of gitlint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
