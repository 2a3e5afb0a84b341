//! Lint configuration loaded from `.gitlint.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the configuration file looked up in the repository and home
/// directories.
pub const CONFIG_FILE_NAME: &str = ".gitlint.yaml";

/// Default `max-parents`, which excludes merge commits.
pub const DEFAULT_MAX_PARENTS: usize = 1;

/// Lint settings. Every field is optional; unset rules are not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LintConfig {
    /// Pattern the subject must contain a match of
    pub subject_regex: Option<String>,
    /// Maximum subject length in characters
    #[serde(rename = "subject-maxlen")]
    pub subject_max_len: Option<usize>,
    /// Minimum subject length in characters
    #[serde(rename = "subject-minlen")]
    pub subject_min_len: Option<usize>,
    /// Pattern the body must contain a match of
    pub body_regex: Option<String>,
    /// Maximum body length in characters
    #[serde(rename = "body-maxlen")]
    pub body_max_len: Option<usize>,
    /// Minimum body length in characters
    #[serde(rename = "body-minlen")]
    pub body_min_len: Option<usize>,
    /// Only lint commits authored on or after this date (YYYY-MM-DD)
    pub since: Option<String>,
    /// Maximum number of parents; 1 skips merge commits
    pub max_parents: Option<usize>,
    /// Skip commits whose author name matches any of these patterns
    #[serde(rename = "excl-author-names")]
    pub exclude_author_names: Option<Vec<String>>,
    /// Skip commits whose author email matches any of these patterns
    #[serde(rename = "excl-author-emails")]
    pub exclude_author_emails: Option<Vec<String>>,
    /// Text written after each reported issue
    pub separator: Option<String>,
}

impl LintConfig {
    /// Loads configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration for a repository.
    ///
    /// An explicit path must exist. Otherwise `<repo_dir>/.gitlint.yaml` is
    /// tried, then `$HOME/.gitlint.yaml`; with neither present the defaults
    /// are returned.
    pub fn load(explicit: Option<&Path>, repo_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "Loading explicit config");
            return Self::load_from_path(path);
        }

        match Self::discover(repo_dir) {
            Some(path) => {
                debug!(path = %path.display(), "Loading discovered config");
                Self::load_from_path(path)
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Finds the first existing config file for `repo_dir`.
    pub fn discover(repo_dir: &Path) -> Option<PathBuf> {
        let local = repo_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }

        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .filter(|path| path.is_file())
    }

    /// Overlays `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            subject_regex: overrides.subject_regex.or(self.subject_regex),
            subject_max_len: overrides.subject_max_len.or(self.subject_max_len),
            subject_min_len: overrides.subject_min_len.or(self.subject_min_len),
            body_regex: overrides.body_regex.or(self.body_regex),
            body_max_len: overrides.body_max_len.or(self.body_max_len),
            body_min_len: overrides.body_min_len.or(self.body_min_len),
            since: overrides.since.or(self.since),
            max_parents: overrides.max_parents.or(self.max_parents),
            exclude_author_names: overrides.exclude_author_names.or(self.exclude_author_names),
            exclude_author_emails: overrides
                .exclude_author_emails
                .or(self.exclude_author_emails),
            separator: overrides.separator.or(self.separator),
        }
    }

    /// Effective `max-parents`.
    pub fn max_parents(&self) -> usize {
        self.max_parents.unwrap_or(DEFAULT_MAX_PARENTS)
    }

    /// Effective separator.
    pub fn separator(&self) -> &str {
        self.separator
            .as_deref()
            .unwrap_or(crate::report::DEFAULT_SEPARATOR)
    }
}
