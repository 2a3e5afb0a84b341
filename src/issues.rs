//! Issues raised against commits and the collector that gathers them.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::commits::CommitSource;
use crate::git::Commit;

pub mod rules;

pub use rules::{
    BodyMaxLength, BodyMinLength, BodyRegex, SubjectMaxLength, SubjectMinLength, SubjectRegex,
};

/// A rule violation found on one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    desc: String,
    commit: Commit,
}

impl Issue {
    /// Creates an issue, or `None` when `desc` is empty.
    ///
    /// An empty description means "no problem found".
    pub fn new(desc: impl Into<String>, commit: &Commit) -> Option<Self> {
        let desc = desc.into();
        if desc.is_empty() {
            return None;
        }

        Some(Self {
            desc,
            commit: commit.clone(),
        })
    }

    /// Human-readable description of the violated rule.
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// The offending commit.
    pub fn commit(&self) -> &Commit {
        &self.commit
    }
}

/// Inspects one commit and reports at most one issue.
pub trait Rule {
    /// Returns the issue found on `commit`, if any.
    fn check(&self, commit: &Commit) -> Option<Issue>;
}

impl<R: Rule + ?Sized> Rule for &R {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        (**self).check(commit)
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        (**self).check(commit)
    }
}

/// A rule backed by a closure; see [`from_fn`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FromFn")
    }
}

impl<F: Fn(&Commit) -> Option<Issue>> Rule for FromFn<F> {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        (self.0)(commit)
    }
}

/// Turns a closure into a [`Rule`].
pub fn from_fn<F: Fn(&Commit) -> Option<Issue>>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// Applies every rule to every commit of `source`.
///
/// Issues are returned in discovery order: commits in source order, and for
/// each commit the rules in list order.
pub fn collect<R, S>(rules: &[R], source: &S) -> Result<Vec<Issue>>
where
    R: Rule,
    S: CommitSource + ?Sized,
{
    let commits = source.commits()?;

    let issues: Vec<Issue> = commits
        .iter()
        .flat_map(|commit| rules.iter().filter_map(move |rule| rule.check(commit)))
        .collect();

    debug!(
        commits = commits.len(),
        rules = rules.len(),
        issues = issues.len(),
        "Collected issues"
    );

    Ok(issues)
}
