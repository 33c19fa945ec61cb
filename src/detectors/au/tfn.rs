/// Australian Tax File Number detector
///
/// TFNs are 9 digits, commonly written in groups of three. Candidates are
/// checked against the weighted modulo-11 checksum; failures are still
/// reported at reduced confidence so compliance reviewers see near-misses.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// 9 digits with optional space/dash separators between groups of three
static TFN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{3}[ \-]?\d{3}[ \-]?\d{3}\b").expect("Failed to compile TFN regex")
});

pub struct TfnDetector {
    validators: Arc<ValidatorRegistry>,
}

impl TfnDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }

    /// Pre-filter: cleaned form must be exactly 9 digits and must not
    /// start with 0 (no TFN is issued with a leading zero).
    fn pre_filter(matched: &str) -> bool {
        let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.len() == 9 && !digits.starts_with('0')
    }
}

impl Detector for TfnDetector {
    fn name(&self) -> &str {
        "tfn"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in TFN_PATTERN.find_iter(text) {
            if !Self::pre_filter(capture.as_str()) {
                continue;
            }

            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Tfn,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Detects Australian Tax File Numbers (9 digits). \
             Validates the weighted modulo-11 checksum; checksum failures \
             are reported at reduced confidence."
                .to_string(),
        )
    }
}
