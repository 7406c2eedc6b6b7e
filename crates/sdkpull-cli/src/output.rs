//! Output formatting for the CLI.

use console::{style, Term};
use std::io::Write;
use std::path::Path;

use sdkpull_core::installer::{ComponentOutcome, CopyReport};

/// Verbosity levels, selected by repeating `-v`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }

    /// Default `env_logger` filter for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Output handler for the CLI.
///
/// Everything goes to stdout, diagnostics included, so CI logs keep one ordered stream.
pub struct Output {
    term: Term,
    verbosity: Verbosity,
}

impl Output {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            term: Term::stdout(),
            verbosity,
        }
    }

    /// Write a line
    pub fn writeln(&self, message: &str) {
        let _ = writeln!(&self.term, "{}", message);
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        let _ = writeln!(&self.term, "{}", style(message).cyan());
    }

    /// Write a success message
    pub fn success(&self, message: &str) {
        let _ = writeln!(&self.term, "{} {}", style("✓").green().bold(), style(message).green());
    }

    /// Write a warning message
    pub fn warning(&self, message: &str) {
        let _ = writeln!(&self.term, "{} {}", style("Warning:").yellow().bold(), message);
    }

    /// Write an error message
    pub fn error(&self, message: &str) {
        let _ = writeln!(&self.term, "{} {}", style("Error:").red().bold(), message);
    }

    /// Write a verbose message
    pub fn verbose(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            let _ = writeln!(&self.term, "{}", style(message).dim());
        }
    }

    /// Write a section header
    pub fn section(&self, title: &str) {
        let _ = writeln!(&self.term, "\n{}", style(title).bold().underlined());
    }

    /// Write a list item
    pub fn list_item(&self, prefix: &str, message: &str) {
        let _ = writeln!(&self.term, "  {} {}", style(prefix).green(), message);
    }

    /// Write a table row
    pub fn table_row(&self, columns: &[&str], widths: &[usize]) {
        let mut line = String::from("  ");
        for (i, col) in columns.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(20);
            line.push_str(&format!("{:<width$}", col, width = width));
        }
        let _ = writeln!(&self.term, "{}", line.trim_end());
    }

    /// Render the per-component result of a copy
    pub fn copy_report(&self, report: &CopyReport) {
        if report.used_fallback_root {
            self.warning(&format!(
                "Could not find the SDK root marker, using {}",
                report.source_root.display()
            ));
        }

        for entry in &report.components {
            match &entry.outcome {
                ComponentOutcome::Copied { destination, files } => {
                    self.list_item(
                        "✓",
                        &format!("Copied {} ({} files)", entry.component.display_name(), files),
                    );
                    self.verbose(&format!("    -> {}", destination.display()));
                }
                ComponentOutcome::Missing { source } => {
                    self.warning(&format!(
                        "{} not found at {}",
                        entry.component.display_name(),
                        source.display()
                    ));
                }
            }
        }

        let (copied, total) = report.plugin_counts();
        if total > 0 {
            self.writeln(&format!("  Plugins: {}/{} installed", copied, total));
        }
    }

    /// Final line for the archive handed to the installer
    pub fn installer_status(&self, installer: &Path, deleted: bool) {
        if deleted {
            self.writeln(&format!("Installer cleaned up: {}", installer.display()));
        } else {
            self.writeln(&format!("Installer preserved: {}", installer.display()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_occurrences() {
        assert_eq!(Verbosity::from_occurrences(0), Verbosity::Normal);
        assert_eq!(Verbosity::from_occurrences(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_occurrences(2), Verbosity::Debug);
        assert_eq!(Verbosity::from_occurrences(7), Verbosity::Debug);
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(Verbosity::Normal.log_filter(), "warn");
        assert_eq!(Verbosity::Verbose.log_filter(), "info");
        assert_eq!(Verbosity::Debug.log_filter(), "debug");
    }
}
