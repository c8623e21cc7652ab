use crate::culprit_analysis::domain::CulpritReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    root: &'a str,
    target: &'a str,
    chain_count: usize,
    chains: Vec<JsonChain<'a>>,
    matched_targets: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct JsonChain<'a> {
    packages: Vec<&'a str>,
    importer: &'a str,
    target: &'a str,
}

/// JsonFormatter adapter producing a machine-readable report
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &CulpritReport) -> Result<String> {
        let chains = report
            .sorted_chains()
            .into_iter()
            .map(|chain| JsonChain {
                packages: chain.packages().iter().map(|p| p.as_str()).collect(),
                importer: chain.importer().as_str(),
                target: chain.target().as_str(),
            })
            .collect();

        let document = JsonReport {
            root: report.root().as_str(),
            target: report.target_pattern(),
            chain_count: report.len(),
            chains,
            matched_targets: report
                .matched_targets()
                .into_iter()
                .map(|p| p.as_str())
                .collect(),
        };

        let mut json = serde_json::to_string_pretty(&document)?;
        json.push('\n');
        Ok(json)
    }
}
