/// Medicare number detector
///
/// Medicare card numbers are 10 digits plus an optional issue digit; the
/// first digit is always 2-6. The Individual Reference Number and issue
/// digit are kept in the reported match but do not enter the checksum.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// First digit 2-6, then the card body with optional separators,
/// IRN and optional issue digit at the end
static MEDICARE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[2-6]\d{3}[ \-]?\d{5}[ \-]?\d(?:[ \-]?\d)?\b")
        .expect("Failed to compile Medicare regex")
});

pub struct MedicareDetector {
    validators: Arc<ValidatorRegistry>,
}

impl MedicareDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }

    fn pre_filter(matched: &str) -> bool {
        let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.len() == 10 || digits.len() == 11
    }
}

impl Detector for MedicareDetector {
    fn name(&self) -> &str {
        "medicare"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in MEDICARE_PATTERN.find_iter(text) {
            if !Self::pre_filter(capture.as_str()) {
                continue;
            }

            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Medicare,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Detects Australian Medicare numbers (10-11 digits, first digit \
             2-6). Validates the weighted modulo-10 checksum."
                .to_string(),
        )
    }
}
