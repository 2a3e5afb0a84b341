//! CLI interface for gitlint.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::commits::MessageInput;
use crate::config::LintConfig;
use crate::git::GitRepository;
use crate::lint::Linter;

/// gitlint: checks commit messages against configurable rules.
#[derive(Parser, Debug)]
#[command(name = "gitlint")]
#[command(about = "Checks git commit messages against configurable rules", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the git repository.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Configuration file (defaults to .gitlint.yaml in the repository, then in $HOME).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Lints only the message in this file instead of the repository history ("-" for stdin).
    #[arg(long, value_name = "FILE")]
    pub msg_file: Option<String>,

    /// Regex the subject must contain a match of.
    #[arg(long, value_name = "REGEX")]
    pub subject_regex: Option<String>,

    /// Maximum subject length.
    #[arg(long = "subject-maxlen", value_name = "N")]
    pub subject_max_len: Option<usize>,

    /// Minimum subject length.
    #[arg(long = "subject-minlen", value_name = "N")]
    pub subject_min_len: Option<usize>,

    /// Regex the body must contain a match of.
    #[arg(long, value_name = "REGEX")]
    pub body_regex: Option<String>,

    /// Maximum body length.
    #[arg(long = "body-maxlen", value_name = "N")]
    pub body_max_len: Option<usize>,

    /// Minimum body length.
    #[arg(long = "body-minlen", value_name = "N")]
    pub body_min_len: Option<usize>,

    /// Only lints commits authored on or after this date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub since: Option<String>,

    /// Maximum number of parents a linted commit may have (default 1 skips merges).
    #[arg(long, value_name = "N")]
    pub max_parents: Option<usize>,

    /// Skips commits whose author name matches this regex (repeatable).
    #[arg(long = "excl-author-names", value_name = "REGEX")]
    pub exclude_author_names: Option<Vec<String>>,

    /// Skips commits whose author email matches this regex (repeatable).
    #[arg(long = "excl-author-emails", value_name = "REGEX")]
    pub exclude_author_emails: Option<Vec<String>>,

    /// Text written after each reported issue.
    #[arg(long)]
    pub separator: Option<String>,
}

impl Cli {
    /// Settings given on the command line, to be overlaid on the config file.
    pub fn overrides(&self) -> LintConfig {
        LintConfig {
            subject_regex: self.subject_regex.clone(),
            subject_max_len: self.subject_max_len,
            subject_min_len: self.subject_min_len,
            body_regex: self.body_regex.clone(),
            body_max_len: self.body_max_len,
            body_min_len: self.body_min_len,
            since: self.since.clone(),
            max_parents: self.max_parents,
            exclude_author_names: self.exclude_author_names.clone(),
            exclude_author_emails: self.exclude_author_emails.clone(),
            separator: self.separator.clone(),
        }
    }

    /// Executes the lint run and writes the report to stdout.
    ///
    /// Returns the number of issues found.
    pub fn execute(self) -> Result<usize> {
        let stdout = io::stdout();
        self.execute_to(&mut stdout.lock())
    }

    /// Executes the lint run, writing the report to `writer`.
    pub fn execute_to<W: io::Write>(self, writer: &mut W) -> Result<usize> {
        let config =
            LintConfig::load(self.config.as_deref(), &self.path)?.merge(self.overrides());
        let linter = Linter::new(config);

        let source = match &self.msg_file {
            Some(arg) => linter.message_source(MessageInput::from_arg(arg)),
            None => {
                let repo = GitRepository::open_at(&self.path).context(
                    "Failed to open git repository. Make sure you're in a git repository.",
                )?;
                linter.repository_source(repo)?
            }
        };

        let issues = linter.lint(&source)?;
        linter.reporter().print(writer, &issues)?;

        Ok(issues.len())
    }
}
