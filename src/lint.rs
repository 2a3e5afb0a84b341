//! Pipeline assembly: sources, filters, rules and reporting from a config.

use anyhow::Result;
use tracing::info;

use crate::commits::{
    CommitSource, CommitSourceExt, MessageCommits, MessageInput, RepositoryCommits,
};
use crate::config::LintConfig;
use crate::git::GitRepository;
use crate::issues::{
    self, BodyMaxLength, BodyMinLength, BodyRegex, Issue, Rule, SubjectMaxLength,
    SubjectMinLength, SubjectRegex,
};
use crate::report::Reporter;

/// Builds and runs lint pipelines for one configuration.
#[derive(Debug, Clone, Default)]
pub struct Linter {
    config: LintConfig,
}

impl Linter {
    /// Creates a linter for `config`.
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    /// Compiles the configured rules, in reporting order.
    pub fn rules(&self) -> Result<Vec<Box<dyn Rule>>> {
        let config = &self.config;
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();

        if let Some(pattern) = &config.subject_regex {
            rules.push(Box::new(SubjectRegex::new(pattern)?));
        }
        if let Some(max) = config.subject_max_len {
            rules.push(Box::new(SubjectMaxLength(max)));
        }
        if let Some(min) = config.subject_min_len {
            rules.push(Box::new(SubjectMinLength(min)));
        }
        if let Some(pattern) = &config.body_regex {
            rules.push(Box::new(BodyRegex::new(pattern)?));
        }
        if let Some(max) = config.body_max_len {
            rules.push(Box::new(BodyMaxLength(max)));
        }
        if let Some(min) = config.body_min_len {
            rules.push(Box::new(BodyMinLength(min)));
        }

        Ok(rules)
    }

    /// History from HEAD of `repo`, narrowed by the configured filters.
    pub fn repository_source(&self, repo: GitRepository) -> Result<Box<dyn CommitSource>> {
        let config = &self.config;
        let mut source = RepositoryCommits::new(repo)
            .with_max_parents(config.max_parents())
            .boxed();

        if let Some(emails) = &config.exclude_author_emails {
            source = source.not_authored_by_emails(emails)?.boxed();
        }
        if let Some(names) = &config.exclude_author_names {
            source = source.not_authored_by_names(names)?.boxed();
        }
        if let Some(since) = &config.since {
            source = source.since(since)?.boxed();
        }

        Ok(source)
    }

    /// A single pending message. Repository filters do not apply.
    pub fn message_source(&self, input: MessageInput) -> Box<dyn CommitSource> {
        MessageCommits::new(input).boxed()
    }

    /// Runs the configured rules against `source`.
    pub fn lint<S: CommitSource + ?Sized>(&self, source: &S) -> Result<Vec<Issue>> {
        let rules = self.rules()?;
        let found = issues::collect(&rules, source)?;
        info!(rules = rules.len(), issues = found.len(), "Lint finished");
        Ok(found)
    }

    /// Reporter using the configured separator.
    pub fn reporter(&self) -> Reporter {
        Reporter::new(self.config.separator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LintError;

    #[test]
    fn no_rules_by_default() {
        assert!(Linter::default().rules().unwrap().is_empty());
    }

    #[test]
    fn invalid_rule_pattern_is_fatal() {
        let linter = Linter::new(LintConfig {
            subject_regex: Some("(".to_string()),
            ..LintConfig::default()
        });

        let Err(err) = linter.rules() else {
            panic!("expected an invalid pattern error");
        };
        assert!(matches!(
            err.downcast_ref::<LintError>(),
            Some(LintError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn message_is_linted_with_configured_rules() {
        let linter = Linter::new(LintConfig {
            subject_max_len: Some(10),
            body_min_len: Some(1),
            ..LintConfig::default()
        });

        let source = linter.message_source(MessageInput::Text(
            "A subject that is far too long".to_string(),
        ));
        let issues = linter.lint(&source).unwrap();
        let report = linter.reporter().render(&issues).unwrap();

        assert_eq!(
            report,
            "fakehsh: subject length exceeds max [10]\nfakehsh: body length less than min [1]\n"
        );
    }

    #[test]
    fn reporter_uses_configured_separator() {
        let linter = Linter::new(LintConfig {
            separator: Some(";".to_string()),
            subject_min_len: Some(100),
            ..LintConfig::default()
        });

        let issues = linter
            .lint(&linter.message_source(MessageInput::Text("short".to_string())))
            .unwrap();
        assert_eq!(
            linter.reporter().render(&issues).unwrap(),
            "fakehsh: subject length less than min [100];"
        );
    }
}
