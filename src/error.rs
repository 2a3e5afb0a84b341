//! Lint-specific error handling.

use thiserror::Error;

/// Errors raised while building or running a lint pipeline.
#[derive(Error, Debug)]
pub enum LintError {
    /// A `--since` boundary that is not a `YYYY-MM-DD` date.
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Underlying parse error, absent when the date parsed but is not
        /// zero-padded to the full width.
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// A regular expression that failed to compile.
    #[error("Invalid pattern '{pattern}'")]
    InvalidPattern {
        /// The rejected pattern (patterns joined with `, ` for sets).
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A commit hash too short to abbreviate.
    #[error("Commit hash '{0}' is shorter than {len} characters", len = crate::git::SHORT_HASH_LEN)]
    ShortHash(String),

    /// The commit message input could not be read.
    #[error("Failed to read commit message from {origin}")]
    UnreadableMessage {
        /// Where the message was read from.
        origin: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

// Note: anyhow already has a blanket impl for thiserror::Error types
