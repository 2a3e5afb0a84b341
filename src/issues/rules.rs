//! Commit message rules.

use regex::Regex;

use crate::error::LintError;
use crate::git::Commit;
use crate::issues::{Issue, Rule};

fn compile(pattern: &str) -> Result<Regex, LintError> {
    Regex::new(pattern).map_err(|source| LintError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Flags commits whose subject does not contain a match of the pattern.
#[derive(Debug, Clone)]
pub struct SubjectRegex {
    pattern: Regex,
}

impl SubjectRegex {
    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> Result<Self, LintError> {
        Ok(Self {
            pattern: compile(pattern)?,
        })
    }
}

impl Rule for SubjectRegex {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        if self.pattern.is_match(commit.subject()) {
            return None;
        }
        Issue::new(
            format!("subject does not match regex [{}]", self.pattern.as_str()),
            commit,
        )
    }
}

/// Flags commits whose body does not contain a match of the pattern.
#[derive(Debug, Clone)]
pub struct BodyRegex {
    pattern: Regex,
}

impl BodyRegex {
    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> Result<Self, LintError> {
        Ok(Self {
            pattern: compile(pattern)?,
        })
    }
}

impl Rule for BodyRegex {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        if self.pattern.is_match(&commit.body()) {
            return None;
        }
        Issue::new(
            format!("body does not conform to regex [{}]", self.pattern.as_str()),
            commit,
        )
    }
}

/// Flags subjects longer than the limit, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectMaxLength(pub usize);

impl Rule for SubjectMaxLength {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        (commit.subject().chars().count() > self.0)
            .then(|| Issue::new(format!("subject length exceeds max [{}]", self.0), commit))
            .flatten()
    }
}

/// Flags subjects shorter than the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectMinLength(pub usize);

impl Rule for SubjectMinLength {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        (commit.subject().chars().count() < self.0)
            .then(|| Issue::new(format!("subject length less than min [{}]", self.0), commit))
            .flatten()
    }
}

/// Flags bodies longer than the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyMaxLength(pub usize);

impl Rule for BodyMaxLength {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        (commit.body().chars().count() > self.0)
            .then(|| Issue::new(format!("body length exceeds max [{}]", self.0), commit))
            .flatten()
    }
}

/// Flags bodies shorter than the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyMinLength(pub usize);

impl Rule for BodyMinLength {
    fn check(&self, commit: &Commit) -> Option<Issue> {
        (commit.body().chars().count() < self.0)
            .then(|| Issue::new(format!("body length less than min [{}]", self.0), commit))
            .flatten()
    }
}
