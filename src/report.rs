//! Plain-text issue report.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};

use crate::issues::Issue;

/// Separator written after each issue unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Renders issues as `<short id>: <description><separator>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reporter {
    separator: String,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl Reporter {
    /// Creates a reporter using `separator` after every issue, the last one
    /// included.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Renders the whole report.
    pub fn render(&self, issues: &[Issue]) -> Result<String> {
        let mut out = String::new();
        for issue in issues {
            let short_id = issue.commit().short_id()?;
            write!(out, "{short_id}: {}{}", issue.desc(), self.separator)
                .context("Failed to format issue")?;
        }
        Ok(out)
    }

    /// Writes the report to `writer`.
    ///
    /// The report is rendered in full before the first byte is written.
    pub fn print<W: Write + ?Sized>(&self, writer: &mut W, issues: &[Issue]) -> Result<()> {
        let report = self.render(issues)?;
        writer
            .write_all(report.as_bytes())
            .context("Failed to write report")?;
        writer.flush().context("Failed to flush report")?;
        Ok(())
    }
}
