//! Commit value type and message accessors.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LintError;
use crate::git::SHORT_HASH_LEN;

/// A single commit as seen by the linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full SHA-1 hash of the commit
    pub hash: String,
    /// The commit message as written by the author
    pub message: String,
    /// Author date with the author's timezone offset
    pub date: DateTime<FixedOffset>,
    /// Number of parent commits (0 for a root commit, 2+ for merges)
    pub num_parents: usize,
    /// Commit author
    pub author: Author,
}

/// Author of a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Author name
    pub name: String,
    /// Author email address
    pub email: String,
}

impl Author {
    /// Creates an author from a name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Commit {
    /// Builds a commit record from a git2::Commit.
    pub fn from_git_commit(commit: &git2::Commit<'_>) -> Result<Self> {
        let hash = commit.id().to_string();
        let signature = commit.author();

        let when = signature.when();
        let offset = FixedOffset::east_opt(when.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
        let date = offset
            .timestamp_opt(when.seconds(), 0)
            .single()
            .with_context(|| format!("Invalid author timestamp on commit {hash}"))?;

        Ok(Self {
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            date,
            num_parents: commit.parent_count(),
            author: Author {
                name: String::from_utf8_lossy(signature.name_bytes()).into_owned(),
                email: String::from_utf8_lossy(signature.email_bytes()).into_owned(),
            },
            hash,
        })
    }

    /// Returns the full commit hash.
    pub fn id(&self) -> &str {
        &self.hash
    }

    /// Returns the abbreviated hash (first 7 characters).
    ///
    /// Hashes shorter than that cannot be abbreviated and are rejected
    /// rather than padded or truncated.
    pub fn short_id(&self) -> Result<&str, LintError> {
        self.hash
            .get(..SHORT_HASH_LEN)
            .ok_or_else(|| LintError::ShortHash(self.hash.clone()))
    }

    /// Returns the first line of the message.
    pub fn subject(&self) -> &str {
        match self.message.split_once('\n') {
            Some((subject, _)) => subject,
            None => &self.message,
        }
    }

    /// Returns everything after the first blank line of the message.
    ///
    /// Paragraphs are concatenated without the blank lines that separated
    /// them; line breaks inside a paragraph are kept.
    pub fn body(&self) -> String {
        self.message.split("\n\n").skip(1).collect()
    }
}
