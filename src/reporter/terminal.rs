/// Coloured terminal summary of a scan
use crate::core::{RiskLevel, ScanResult};
use crate::reporter::mask_finding;
use colored::Colorize;

pub struct TerminalReporter {
    max_findings: usize,
    show_context: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            max_findings: 25,
            show_context: false,
        }
    }

    pub fn max_findings(mut self, max: usize) -> Self {
        self.max_findings = max;
        self
    }

    pub fn show_context(mut self, show: bool) -> Self {
        self.show_context = show;
        self
    }

    fn risk_tag(level: RiskLevel) -> colored::ColoredString {
        match level {
            RiskLevel::Critical => "CRITICAL".red().bold(),
            RiskLevel::High => "HIGH".red(),
            RiskLevel::Medium => "MEDIUM".yellow(),
            RiskLevel::Low => "LOW".green(),
        }
    }

    pub fn report(&self, result: &ScanResult) {
        println!();
        println!("{}", "Scan summary".bold());
        println!("  repository:  {}", result.repository.url);
        println!(
            "  files:       {} discovered, {} scanned, {} skipped",
            result.stats.total_files, result.stats.scanned_files, result.stats.skipped_files
        );
        println!(
            "  duration:    {:.2}s",
            result.duration as f64 / 1_000_000_000.0
        );
        println!("  findings:    {}", result.stats.total_findings);

        for level in ["CRITICAL", "HIGH", "MEDIUM", "LOW"] {
            if let Some(count) = result.stats.findings_by_risk.get(level) {
                println!("    {:10} {}", level, count);
            }
        }

        if !result.findings.is_empty() {
            println!();
            println!("{}", "Findings".bold());

            let mut sorted: Vec<_> = result.findings.iter().collect();
            sorted.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));

            for finding in sorted.iter().take(self.max_findings) {
                println!(
                    "  [{}] {} {} at {}:{}:{} ({})",
                    Self::risk_tag(finding.risk_level),
                    finding.pi_type.tag().bold(),
                    mask_finding(finding),
                    finding.file,
                    finding.line,
                    finding.column,
                    finding.detector_name
                );
                if self.show_context && !finding.context_before.is_empty() {
                    println!("      ...{}", finding.context_before.trim_start());
                }
            }

            if result.findings.len() > self.max_findings {
                println!(
                    "  ... and {} more (see the JSON artefact)",
                    result.findings.len() - self.max_findings
                );
            }
        }

        if !result.errors.is_empty() {
            println!();
            println!("{} {} file error(s)", "!".yellow(), result.errors.len());
        }

        println!();
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
