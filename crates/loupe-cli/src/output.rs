//! Output formatting

use clap::ValueEnum;
use console::{style, Style, Term};
use loupe::{MatchReport, MatchStatus, RankedSummary};
use serde::{Deserialize, Serialize};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Console reporter for command results
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a reporter writing to stdout
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print a line unconditionally
    pub fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        let _ = self.term.write_line(&styled);
    }

    /// Print ranked strategies, best first
    pub fn ranked(&self, strategies: &[RankedSummary]) {
        for (i, s) in strategies.iter().enumerate() {
            self.line(&self.ranked_line(i + 1, s));
        }
    }

    fn ranked_line(&self, rank: usize, s: &RankedSummary) -> String {
        let badge = if s.is_unique {
            "unique".to_string()
        } else {
            format!("{} matches", s.match_count)
        };
        if self.use_color {
            let badge_style = if s.is_unique {
                Style::new().green()
            } else if s.match_count == 0 {
                Style::new().red()
            } else {
                Style::new().yellow()
            };
            format!(
                "{:>2}. {} {} {}",
                rank,
                style(&s.code).bold(),
                badge_style.apply_to(format!("[{badge}]")),
                style(format!("{} ({:.2}ms)", s.description, s.timing_ms)).dim()
            )
        } else {
            format!(
                "{rank:>2}. {} [{badge}] {} ({:.2}ms)",
                s.code, s.description, s.timing_ms
            )
        }
    }

    /// Print a validation verdict and the matched elements
    pub fn match_report(&self, report: &MatchReport) {
        let status = report.status();
        let verdict = if self.use_color {
            let verdict_style = match status {
                MatchStatus::Unique => Style::new().green().bold(),
                MatchStatus::Multiple(_) => Style::new().yellow().bold(),
                MatchStatus::NoMatch => Style::new().red().bold(),
            };
            verdict_style.apply_to(status.to_string()).to_string()
        } else {
            status.to_string()
        };
        self.line(&format!("{verdict} ({:.2}ms)", report.timing_ms));
        for element in &report.elements {
            if element.text.is_empty() {
                self.line(&format!("  {}", element.label));
            } else {
                self.line(&format!("  {} {:?}", element.label, element.text));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use loupe::{Strategy, StrategyKind};

    fn summary(is_unique: bool, match_count: usize) -> RankedSummary {
        RankedSummary {
            kind: StrategyKind::Text,
            description: StrategyKind::Text.description(),
            priority: StrategyKind::Text.priority(),
            code: "page.getByText('Save')".into(),
            strategy: Strategy::text("Save"),
            match_count,
            is_unique,
            is_valid: match_count > 0,
            timing_ms: 0.25,
        }
    }

    mod output_format_tests {
        use super::*;

        #[test]
        fn test_default_format() {
            assert_eq!(OutputFormat::default(), OutputFormat::Text);
        }
    }

    mod reporter_tests {
        use super::*;

        #[test]
        fn test_new_reporter() {
            let reporter = Reporter::new(true, false);
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
        }

        #[test]
        fn test_ranked_line_plain() {
            let reporter = Reporter::new(false, false);
            assert_eq!(
                reporter.ranked_line(1, &summary(true, 1)),
                " 1. page.getByText('Save') [unique] getByText (0.25ms)"
            );
            assert!(reporter
                .ranked_line(2, &summary(false, 3))
                .contains("[3 matches]"));
        }

        #[test]
        fn test_messages_do_not_panic() {
            let reporter = Reporter::new(false, true);
            reporter.success("hidden");
            reporter.warning("hidden");
            reporter.info("hidden");
            reporter.header("hidden");
            reporter.match_report(&MatchReport {
                count: 0,
                timing_ms: 0.1,
                is_unique: false,
                elements: Vec::new(),
            });
        }
    }
}
