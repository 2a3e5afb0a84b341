//! Commit sources.
//!
//! A [`CommitSource`] produces an ordered list of commits each time it is
//! called. Sources are composed by wrapping one in a [`Filtered`] stage,
//! which re-reads its upstream on every call; nothing is cached.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use tracing::debug;

use crate::error::LintError;
use crate::git::{Author, Commit, GitRepository};

pub mod filter;

pub use filter::{
    CommitFilter, Filtered, NotAuthoredByEmails, NotAuthoredByNames, Since, WithMaxParents,
};

/// Placeholder hash given to commits built from a bare message.
pub const MESSAGE_HASH: &str = "fakehsh";

/// A re-invocable producer of an ordered commit sequence.
pub trait CommitSource {
    /// Produces a fresh list of commits.
    fn commits(&self) -> Result<Vec<Commit>>;
}

impl<S: CommitSource + ?Sized> CommitSource for &S {
    fn commits(&self) -> Result<Vec<Commit>> {
        (**self).commits()
    }
}

impl<S: CommitSource + ?Sized> CommitSource for Box<S> {
    fn commits(&self) -> Result<Vec<Commit>> {
        (**self).commits()
    }
}

impl CommitSource for [Commit] {
    fn commits(&self) -> Result<Vec<Commit>> {
        Ok(self.to_vec())
    }
}

impl CommitSource for Vec<Commit> {
    fn commits(&self) -> Result<Vec<Commit>> {
        Ok(self.clone())
    }
}

/// Chainable constructors for filter stages.
pub trait CommitSourceExt: CommitSource + Sized {
    /// Wraps this source in a stage that keeps commits accepted by `filter`.
    fn filtered<F: CommitFilter>(self, filter: F) -> Filtered<Self, F> {
        Filtered::new(self, filter)
    }

    /// Keeps commits authored on or after `date` (`YYYY-MM-DD`).
    fn since(self, date: &str) -> Result<Filtered<Self, Since>, LintError> {
        Ok(self.filtered(Since::parse(date)?))
    }

    /// Drops commits whose author name matches any of `patterns`.
    fn not_authored_by_names<I>(
        self,
        patterns: I,
    ) -> Result<Filtered<Self, NotAuthoredByNames>, LintError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(self.filtered(NotAuthoredByNames::new(patterns)?))
    }

    /// Drops commits whose author email matches any of `patterns`.
    fn not_authored_by_emails<I>(
        self,
        patterns: I,
    ) -> Result<Filtered<Self, NotAuthoredByEmails>, LintError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(self.filtered(NotAuthoredByEmails::new(patterns)?))
    }

    /// Keeps commits with at most `max` parents.
    fn with_max_parents(self, max: usize) -> Filtered<Self, WithMaxParents> {
        self.filtered(WithMaxParents::new(max))
    }

    /// Erases the concrete source type.
    fn boxed<'a>(self) -> Box<dyn CommitSource + 'a>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<S: CommitSource> CommitSourceExt for S {}

/// Every commit reachable from HEAD of a repository.
#[derive(Debug)]
pub struct RepositoryCommits {
    repo: GitRepository,
}

impl RepositoryCommits {
    /// Creates a source reading from `repo`.
    pub fn new(repo: GitRepository) -> Self {
        Self { repo }
    }
}

impl CommitSource for RepositoryCommits {
    fn commits(&self) -> Result<Vec<Commit>> {
        self.repo.head_commits()
    }
}

/// Where a standalone commit message comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInput {
    /// A file such as `.git/COMMIT_EDITMSG`.
    File(PathBuf),
    /// Standard input.
    Stdin,
    /// Literal text.
    Text(String),
}

impl MessageInput {
    /// Interprets a `--msg-file` argument; `-` means standard input.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Reads the full message.
    pub fn read(&self) -> Result<String, LintError> {
        match self {
            Self::File(path) => {
                let file = fs::File::open(path).map_err(|source| LintError::UnreadableMessage {
                    origin: path.display().to_string(),
                    source,
                })?;
                read_message(&path.display().to_string(), file)
            }
            Self::Stdin => read_message("stdin", io::stdin().lock()),
            Self::Text(text) => Ok(text.clone()),
        }
    }
}

/// Drains `reader` into a message, replacing invalid UTF-8.
fn read_message<R: Read>(origin: &str, mut reader: R) -> Result<String, LintError> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|source| LintError::UnreadableMessage {
            origin: origin.to_string(),
            source,
        })?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// A single synthetic commit wrapping a message that is not committed yet.
///
/// The commit carries [`MESSAGE_HASH`], the current time, no parents and an
/// empty author.
#[derive(Debug, Clone)]
pub struct MessageCommits {
    input: MessageInput,
}

impl MessageCommits {
    /// Creates a source reading the message from `input`.
    pub fn new(input: MessageInput) -> Self {
        Self { input }
    }
}

impl CommitSource for MessageCommits {
    fn commits(&self) -> Result<Vec<Commit>> {
        let message = self.input.read()?;
        debug!(input = ?self.input, bytes = message.len(), "Read commit message");

        Ok(vec![Commit {
            hash: MESSAGE_HASH.to_string(),
            message,
            date: Local::now().into(),
            num_parents: 0,
            author: Author::default(),
        }])
    }
}
