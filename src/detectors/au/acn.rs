/// Australian Company Number detector
///
/// ACNs share the 9-digit shape with TFNs; the pipeline resolves the
/// collision, preferring TFN unless the surrounding text names a company
/// number. Unlike TFNs, ACNs may legitimately start with zero.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// 9 digits with optional space/dash separators between groups of three
static ACN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{3}[ \-]?\d{3}[ \-]?\d{3}\b").expect("Failed to compile ACN regex")
});

pub struct AcnDetector {
    validators: Arc<ValidatorRegistry>,
}

impl AcnDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }

    fn pre_filter(matched: &str) -> bool {
        let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.len() == 9
    }
}

impl Detector for AcnDetector {
    fn name(&self) -> &str {
        "acn"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in ACN_PATTERN.find_iter(text) {
            if !Self::pre_filter(capture.as_str()) {
                continue;
            }

            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Acn,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Detects Australian Company Numbers (9 digits). \
             Validates the weighted check digit."
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_validators;

    fn detector() -> AcnDetector {
        AcnDetector::new(Arc::new(default_validators()))
    }

    #[test]
    fn test_valid_acn() {
        let findings = detector().detect("company ACN 010 499 966 registered", "readme.md");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].pi_type, PIType::Acn);
        assert!(findings[0].validated);
    }

    #[test]
    fn test_leading_zero_allowed() {
        let findings = detector().detect("acn = \"000000019\"", "fixtures.go");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].validated);
    }

    #[test]
    fn test_invalid_check_digit() {
        let findings = detector().detect("acn = \"000000018\"", "a.go");
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].validated);
    }
}
