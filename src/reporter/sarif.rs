/// SARIF 2.1.0 renderer for code-scanning integrations
use crate::core::{RiskLevel, ScanResult};
use crate::reporter::mask_finding;
use anyhow::{Context, Result};
use serde_json::json;
use std::collections::BTreeSet;
use std::path::Path;

pub struct SarifReporter;

impl SarifReporter {
    pub fn new() -> Self {
        Self
    }

    fn sarif_level(level: RiskLevel) -> &'static str {
        match level {
            RiskLevel::Critical | RiskLevel::High => "error",
            RiskLevel::Medium => "warning",
            RiskLevel::Low => "note",
        }
    }

    /// Render to a SARIF JSON string
    pub fn render(&self, result: &ScanResult) -> Result<String> {
        let rule_ids: BTreeSet<String> =
            result.findings.iter().map(|f| f.pi_type.tag()).collect();

        let rules: Vec<_> = rule_ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "name": id,
                    "shortDescription": { "text": format!("{} detected in source", id) },
                })
            })
            .collect();

        let results: Vec<_> = result
            .findings
            .iter()
            .map(|f| {
                json!({
                    "ruleId": f.pi_type.tag(),
                    "level": Self::sarif_level(f.risk_level),
                    "message": {
                        "text": format!(
                            "{} {} found by {} (validated: {})",
                            f.pi_type.tag(),
                            mask_finding(f),
                            f.detector_name,
                            f.validated
                        )
                    },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": { "uri": f.file },
                            "region": {
                                "startLine": f.line,
                                "startColumn": f.column,
                            }
                        }
                    }],
                    "properties": {
                        "confidence": f.confidence,
                        "contextModifier": f.context_modifier,
                        "riskLevel": f.risk_level.to_string(),
                    }
                })
            })
            .collect();

        let sarif = json!({
            "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": "pi-sentinel",
                        "version": env!("CARGO_PKG_VERSION"),
                        "informationUri": "https://github.com/pi-sentinel/pi-sentinel",
                        "rules": rules,
                    }
                },
                "results": results,
            }]
        });

        serde_json::to_string_pretty(&sarif).context("Failed to serialise SARIF")
    }

    /// Render to a file
    pub fn write_to_file(&self, result: &ScanResult, path: &Path) -> Result<()> {
        let sarif = self.render(result)?;
        std::fs::write(path, sarif)
            .with_context(|| format!("Failed to write SARIF to {}", path.display()))?;
        Ok(())
    }
}

impl Default for SarifReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Finding, PIType, RepositoryInfo, ScanSummary};
    use chrono::Utc;

    fn sample_result() -> ScanResult {
        let finding = Finding {
            pi_type: PIType::Medicare,
            matched: "2123456701".to_string(),
            file: "src/patient.go".to_string(),
            line: 7,
            column: 5,
            context_before: String::new(),
            context_after: String::new(),
            confidence: 0.95,
            context_modifier: 1.0,
            risk_level: RiskLevel::Critical,
            validated: true,
            validation_error: String::new(),
            detected_at: Utc::now(),
            detector_name: "medicare".to_string(),
            start_byte: 0,
            end_byte: 10,
        };

        let mut result = ScanResult {
            repository: RepositoryInfo::default(),
            scan_started: Utc::now(),
            scan_finished: Utc::now(),
            duration: 1,
            files_scanned: 1,
            findings: vec![finding],
            stats: ScanSummary::default(),
            errors: Vec::new(),
            error: None,
        };
        result.rebuild_summary();
        result
    }

    #[test]
    fn test_sarif_structure() {
        let sarif = SarifReporter::new().render(&sample_result()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&sarif).unwrap();

        assert_eq!(parsed["version"], "2.1.0");
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "pi-sentinel");

        let results = parsed["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["ruleId"], "MEDICARE");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["region"]["startLine"],
            7
        );
    }

    #[test]
    fn test_sarif_masks_matches() {
        let sarif = SarifReporter::new().render(&sample_result()).unwrap();
        assert!(!sarif.contains("2123456701"));
    }
}
