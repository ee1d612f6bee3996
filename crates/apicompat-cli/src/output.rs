//! Output formatting and reporting

use apicompat_core::CompatDifference;
use colored::*;

use crate::OutputFormat;

/// Totals shown after the difference list
#[derive(Debug, Clone)]
pub struct CheckSummary {
    pub left_name: String,
    pub right_name: String,
    pub differences: usize,
    pub suppressed: usize,
}

impl CheckSummary {
    pub fn has_differences(&self) -> bool {
        self.differences > 0
    }
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the report to stdout
    pub fn print(
        &self,
        differences: &[CompatDifference],
        summary: &CheckSummary,
    ) -> anyhow::Result<()> {
        print!("{}", self.render(differences, summary)?);
        Ok(())
    }

    pub fn render(
        &self,
        differences: &[CompatDifference],
        summary: &CheckSummary,
    ) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Human => Ok(self.render_human(differences, summary)),
            OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(differences)?)),
        }
    }

    fn render_human(&self, differences: &[CompatDifference], summary: &CheckSummary) -> String {
        let mut out = String::new();
        for difference in differences {
            out.push_str(&format!("{} : {}\n", difference.id().yellow(), difference.message()));
        }

        let headline = if summary.has_differences() {
            format!(
                "Found {} compatibility difference(s) between '{}' and '{}'",
                summary.differences, summary.left_name, summary.right_name
            )
            .red()
            .bold()
        } else {
            format!(
                "'{}' is compatible with '{}'",
                summary.right_name, summary.left_name
            )
            .green()
            .bold()
        };

        if !differences.is_empty() {
            out.push('\n');
        }
        out.push_str(&headline.to_string());
        if summary.suppressed > 0 {
            out.push_str(&format!(" ({} suppressed)", summary.suppressed).dimmed().to_string());
        }
        out.push('\n');
        out
    }
}
