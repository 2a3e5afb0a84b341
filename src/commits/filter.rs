//! Filter stages narrowing a commit source.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::RegexSet;
use tracing::debug;

use crate::commits::CommitSource;
use crate::error::LintError;
use crate::git::Commit;

/// Date format accepted by [`Since`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decides whether a single commit stays in the sequence.
pub trait CommitFilter {
    /// Returns `true` to keep `commit`.
    fn keep(&self, commit: &Commit) -> bool;

    /// Short name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F: Fn(&Commit) -> bool> CommitFilter for F {
    fn keep(&self, commit: &Commit) -> bool {
        self(commit)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// A commit source that keeps the upstream commits accepted by a filter.
///
/// Each call reads the upstream exactly once and preserves its order.
#[derive(Debug, Clone)]
pub struct Filtered<S, F> {
    upstream: S,
    filter: F,
}

impl<S, F> Filtered<S, F> {
    /// Wraps `upstream` with `filter`.
    pub fn new(upstream: S, filter: F) -> Self {
        Self { upstream, filter }
    }
}

impl<S: CommitSource, F: CommitFilter> CommitSource for Filtered<S, F> {
    fn commits(&self) -> Result<Vec<Commit>> {
        let commits = self.upstream.commits()?;
        let before = commits.len();

        let kept: Vec<Commit> = commits
            .into_iter()
            .filter(|commit| self.filter.keep(commit))
            .collect();

        debug!(
            filter = self.filter.name(),
            before,
            after = kept.len(),
            "Applied commit filter"
        );

        Ok(kept)
    }
}

/// Keeps commits authored on or after midnight UTC of a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Since {
    start: DateTime<Utc>,
}

impl Since {
    /// Parses a `YYYY-MM-DD` boundary.
    ///
    /// The year must have four digits and the month and day two each.
    pub fn parse(date: &str) -> Result<Self, LintError> {
        let invalid = |source: Option<chrono::ParseError>| LintError::InvalidDate {
            input: date.to_string(),
            source,
        };
        let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|err| invalid(Some(err)))?;

        // chrono accepts unpadded fields, short years and surrounding space.
        if day.format(DATE_FORMAT).to_string() != date {
            return Err(invalid(None));
        }

        Ok(Self::from_date(day))
    }

    /// Uses the start of `day` (UTC) as the boundary.
    pub fn from_date(day: NaiveDate) -> Self {
        Self {
            start: Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)),
        }
    }
}

impl CommitFilter for Since {
    fn keep(&self, commit: &Commit) -> bool {
        commit.date.with_timezone(&Utc) >= self.start
    }

    fn name(&self) -> &str {
        "since"
    }
}

/// Compiles author patterns into a single set, reporting the first bad one.
fn compile_patterns<I>(patterns: I) -> Result<RegexSet, LintError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let patterns: Vec<String> = patterns
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect();

    for pattern in &patterns {
        if let Err(source) = regex::Regex::new(pattern) {
            return Err(LintError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            });
        }
    }

    RegexSet::new(&patterns).map_err(|source| LintError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Drops commits whose author name matches any pattern.
#[derive(Debug, Clone)]
pub struct NotAuthoredByNames {
    patterns: RegexSet,
}

impl NotAuthoredByNames {
    /// Compiles `patterns`; an empty list keeps everything.
    pub fn new<I>(patterns: I) -> Result<Self, LintError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(Self {
            patterns: compile_patterns(patterns)?,
        })
    }
}

impl CommitFilter for NotAuthoredByNames {
    fn keep(&self, commit: &Commit) -> bool {
        !self.patterns.is_match(&commit.author.name)
    }

    fn name(&self) -> &str {
        "not-authored-by-names"
    }
}

/// Drops commits whose author email matches any pattern.
#[derive(Debug, Clone)]
pub struct NotAuthoredByEmails {
    patterns: RegexSet,
}

impl NotAuthoredByEmails {
    /// Compiles `patterns`; an empty list keeps everything.
    pub fn new<I>(patterns: I) -> Result<Self, LintError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(Self {
            patterns: compile_patterns(patterns)?,
        })
    }
}

impl CommitFilter for NotAuthoredByEmails {
    fn keep(&self, commit: &Commit) -> bool {
        !self.patterns.is_match(&commit.author.email)
    }

    fn name(&self) -> &str {
        "not-authored-by-emails"
    }
}

/// Keeps commits with at most `max` parents. `max = 1` excludes merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithMaxParents {
    max: usize,
}

impl WithMaxParents {
    /// Creates the filter.
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl CommitFilter for WithMaxParents {
    fn keep(&self, commit: &Commit) -> bool {
        commit.num_parents <= self.max
    }

    fn name(&self) -> &str {
        "with-max-parents"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::CommitSourceExt;
    use crate::git::Author;
    use chrono::FixedOffset;
    use proptest::prelude::*;
    use std::cell::Cell;

    fn commit(hash: &str, date: &str, parents: usize, name: &str, email: &str) -> Commit {
        Commit {
            hash: hash.to_string(),
            message: format!("commit {hash}"),
            date: DateTime::parse_from_rfc3339(date).unwrap(),
            num_parents: parents,
            author: Author::new(name, email),
        }
    }

    fn sample() -> Vec<Commit> {
        vec![
            commit("aaaaaaa1", "2019-06-02T10:00:00Z", 1, "Alice", "alice@example.com"),
            commit("bbbbbbb2", "2019-06-01T00:00:00Z", 2, "Bob", "bob@corp.example"),
            commit("ccccccc3", "2019-05-31T23:59:59Z", 1, "dependabot[bot]", "bot@github.com"),
            commit("ddddddd4", "2019-05-01T12:00:00Z", 0, "Carol", "carol@example.com"),
        ]
    }

    fn hashes(commits: &[Commit]) -> Vec<&str> {
        commits.iter().map(|c| c.hash.as_str()).collect()
    }

    #[test]
    fn since_is_inclusive_at_midnight_utc() {
        let commits = sample().since("2019-06-01").unwrap().commits().unwrap();
        assert_eq!(hashes(&commits), ["aaaaaaa1", "bbbbbbb2"]);
    }

    #[test]
    fn since_compares_instants_across_offsets() {
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        let mut c = commit("eeeeeee5", "2019-06-01T00:00:00Z", 1, "Eve", "eve@example.com");
        // 01:00 at +02:00 is still the previous day in UTC.
        c.date = east.with_ymd_and_hms(2019, 6, 1, 1, 0, 0).unwrap();

        let since = Since::parse("2019-06-01").unwrap();
        assert!(!since.keep(&c));
    }

    #[test]
    fn since_rejects_malformed_date() {
        let err = sample().since("06/01/2019").unwrap_err();
        assert!(matches!(err, LintError::InvalidDate { ref input, .. } if input == "06/01/2019"));
    }

    #[test]
    fn since_rejects_unpadded_or_short_year() {
        for input in ["19-06-01", "2019-6-1", "+2019-06-01", " 2019-06-01", "2019-06-01 "] {
            let err = Since::parse(input).unwrap_err();
            assert!(
                matches!(err, LintError::InvalidDate { input: ref got, .. } if got == input),
                "{input:?} should be rejected"
            );
        }
        assert!(Since::parse("2019-06-01").is_ok());
    }

    #[test]
    fn with_max_parents_removes_only_merges() {
        let commits = sample().with_max_parents(1).commits().unwrap();
        assert_eq!(hashes(&commits), ["aaaaaaa1", "ccccccc3", "ddddddd4"]);
    }

    #[test]
    fn not_authored_by_names_uses_search_semantics() {
        let commits = sample()
            .not_authored_by_names(["bot", "^Bob$"])
            .unwrap()
            .commits()
            .unwrap();
        assert_eq!(hashes(&commits), ["aaaaaaa1", "ddddddd4"]);
    }

    #[test]
    fn not_authored_by_emails_drops_matches() {
        let commits = sample()
            .not_authored_by_emails([r"@corp\.example$"])
            .unwrap()
            .commits()
            .unwrap();
        assert_eq!(hashes(&commits), ["aaaaaaa1", "ccccccc3", "ddddddd4"]);
    }

    #[test]
    fn empty_pattern_list_keeps_everything() {
        let none: [&str; 0] = [];
        let commits = sample().not_authored_by_names(none).unwrap().commits().unwrap();
        assert_eq!(commits, sample());
    }

    #[test]
    fn invalid_pattern_fails_at_construction() {
        let err = NotAuthoredByEmails::new(["ok", "(unclosed"]).unwrap_err();
        assert!(matches!(
            err,
            LintError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"
        ));
    }

    #[test]
    fn chained_filters_preserve_order() {
        let source = sample()
            .with_max_parents(1)
            .not_authored_by_names(["bot"])
            .unwrap()
            .since("2019-05-01")
            .unwrap();
        assert_eq!(hashes(&source.commits().unwrap()), ["aaaaaaa1", "ddddddd4"]);
    }

    #[test]
    fn composed_source_is_idempotent() {
        let source = sample().with_max_parents(1).since("2019-05-15").unwrap();
        assert_eq!(source.commits().unwrap(), source.commits().unwrap());
    }

    #[derive(Default)]
    struct CountingSource {
        calls: Cell<usize>,
    }

    impl CommitSource for CountingSource {
        fn commits(&self) -> Result<Vec<Commit>> {
            self.calls.set(self.calls.get() + 1);
            Ok(sample())
        }
    }

    #[test]
    fn each_call_reads_upstream_once() {
        let upstream = CountingSource::default();
        let source = (&upstream).with_max_parents(1).with_max_parents(0);

        source.commits().unwrap();
        assert_eq!(upstream.calls.get(), 1);
        source.commits().unwrap();
        assert_eq!(upstream.calls.get(), 2);
    }

    #[test]
    fn upstream_errors_propagate() {
        struct Failing;
        impl CommitSource for Failing {
            fn commits(&self) -> Result<Vec<Commit>> {
                anyhow::bail!("no HEAD")
            }
        }

        assert!(Failing.with_max_parents(1).commits().is_err());
    }

    fn arb_commit() -> impl Strategy<Value = Commit> {
        (0usize..4, 0i64..86_400 * 10, "[a-c]{1,3}", "[a-c]{1,3}").prop_map(
            |(parents, offset, name, email)| Commit {
                hash: format!("{offset:07}"),
                message: String::new(),
                date: Utc.timestamp_opt(1_559_347_200 + offset - 86_400 * 5, 0)
                    .unwrap()
                    .into(),
                num_parents: parents,
                author: Author::new(name, email),
            },
        )
    }

    proptest! {
        #[test]
        fn composition_matches_conjunction(
            commits in prop::collection::vec(arb_commit(), 0..20),
            max in 0usize..3,
            name in "[a-c]",
            email in "[a-c]{2}",
        ) {
            let since = Since::parse("2019-06-01").unwrap();
            let by_name = NotAuthoredByNames::new([&name]).unwrap();
            let by_email = NotAuthoredByEmails::new([&email]).unwrap();
            let parents = WithMaxParents::new(max);

            let expected: Vec<Commit> = commits
                .iter()
                .filter(|c| parents.keep(c) && by_name.keep(c) && by_email.keep(c) && since.keep(c))
                .cloned()
                .collect();

            let composed = commits
                .clone()
                .filtered(parents)
                .filtered(by_name.clone())
                .filtered(by_email.clone())
                .filtered(since);

            prop_assert_eq!(composed.commits().unwrap(), expected);
        }
    }
}
