use crate::culprit_analysis::domain::CulpritReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// Separator placed between packages of a rendered chain
const CHAIN_SEPARATOR: &str = " -> ";

/// TextFormatter adapter producing a human-readable report
///
/// Chains are listed shortest first, each rendered as
/// `root -> intermediate -> ... -> importer -> target`.
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &CulpritReport) -> Result<String> {
        let mut out = String::new();

        if report.is_empty() {
            writeln!(
                out,
                "No chains found: {} does not pull in \"{}\"",
                report.root(),
                report.target_pattern()
            )?;
            return Ok(out);
        }

        writeln!(
            out,
            "Found {} chain(s) pulling \"{}\" into {}",
            report.len(),
            report.target_pattern(),
            report.root()
        )?;
        writeln!(out)?;

        for (index, chain) in report.sorted_chains().iter().enumerate() {
            writeln!(out, "{:>4}. {}", index + 1, chain.render(CHAIN_SEPARATOR))?;
        }

        writeln!(out)?;
        writeln!(out, "Matched targets:")?;
        for target in report.matched_targets() {
            writeln!(out, "  - {}", target)?;
        }

        Ok(out)
    }
}
