/// Australian Business Number detector
///
/// ABNs are 11 digits, conventionally grouped "XX XXX XXX XXX". The ABN
/// matcher runs before the TFN matcher in the pipeline: both consume long
/// digit runs and the ABN form is strictly longer.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// 11 digits with optional space/dash separators at the group breaks
static ABN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{2}[ \-]?\d{3}[ \-]?\d{3}[ \-]?\d{3}\b").expect("Failed to compile ABN regex")
});

pub struct AbnDetector {
    validators: Arc<ValidatorRegistry>,
}

impl AbnDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }

    fn pre_filter(matched: &str) -> bool {
        let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.len() == 11
    }
}

impl Detector for AbnDetector {
    fn name(&self) -> &str {
        "abn"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in ABN_PATTERN.find_iter(text) {
            if !Self::pre_filter(capture.as_str()) {
                continue;
            }

            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Abn,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Detects Australian Business Numbers (11 digits). \
             Validates the modulo-89 checksum."
                .to_string(),
        )
    }
}
