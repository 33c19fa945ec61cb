/// CSV renderer for spreadsheet review
use crate::core::ScanResult;
use crate::reporter::mask_finding;
use anyhow::{Context, Result};
use std::path::Path;

pub struct CsvReporter {
    include_context: bool,
}

impl CsvReporter {
    pub fn new() -> Self {
        Self {
            include_context: false,
        }
    }

    pub fn with_context(mut self, enabled: bool) -> Self {
        self.include_context = enabled;
        self
    }

    /// Render to a string
    pub fn render(&self, result: &ScanResult) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec![
            "file",
            "line",
            "column",
            "type",
            "match",
            "risk_level",
            "confidence",
            "validated",
            "validation_error",
            "detector",
        ];
        if self.include_context {
            header.push("context_before");
            header.push("context_after");
        }
        writer.write_record(&header)?;

        for finding in &result.findings {
            let mut record = vec![
                finding.file.clone(),
                finding.line.to_string(),
                finding.column.to_string(),
                finding.pi_type.tag(),
                mask_finding(finding),
                finding.risk_level.to_string(),
                format!("{:.2}", finding.confidence),
                finding.validated.to_string(),
                finding.validation_error.clone(),
                finding.detector_name.clone(),
            ];
            if self.include_context {
                record.push(finding.context_before.clone());
                record.push(finding.context_after.clone());
            }
            writer.write_record(&record)?;
        }

        let bytes = writer.into_inner().context("CSV writer failed")?;
        String::from_utf8(bytes).context("CSV output was not UTF-8")
    }

    /// Render to a file
    pub fn write_to_file(&self, result: &ScanResult, path: &Path) -> Result<()> {
        let csv = self.render(result)?;
        std::fs::write(path, csv)
            .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
        Ok(())
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}
