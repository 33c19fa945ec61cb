/// Bank-State-Branch code detector
///
/// BSBs are 6 digits, usually written with an internal dash ("062-000").
/// Structural validation only: the third digit must be a state digit.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// 6 digits with optional internal dash
static BSB_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}-?\d{3}\b").expect("Failed to compile BSB regex"));

pub struct BsbDetector {
    validators: Arc<ValidatorRegistry>,
}

impl BsbDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }

    /// Pre-filter: digit-only form must be exactly 6 characters
    fn pre_filter(matched: &str) -> bool {
        let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.len() == 6
    }
}

impl Detector for BsbDetector {
    fn name(&self) -> &str {
        "bsb"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in BSB_PATTERN.find_iter(text) {
            if !Self::pre_filter(capture.as_str()) {
                continue;
            }

            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Bsb,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Detects Bank-State-Branch codes (6 digits, optional dash). \
             Validates the state digit."
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_validators;

    fn detector() -> BsbDetector {
        BsbDetector::new(Arc::new(default_validators()))
    }

    #[test]
    fn test_dashed_bsb() {
        let findings = detector().detect("bsb := \"062-000\"", "payment.go");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].pi_type, PIType::Bsb);
        assert!(findings[0].validated);
    }

    #[test]
    fn test_invalid_state_digit() {
        let findings = detector().detect("bsb := \"068-000\"", "payment.go");
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].validated);
        assert!(findings[0].validation_error.contains("state digit"));
    }

    #[test]
    fn test_plain_six_digits() {
        let findings = detector().detect("account at 733000 branch", "notes.txt");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].validated);
    }

    #[test]
    fn test_longer_runs_not_matched() {
        let findings = detector().detect("order 1234567", "orders.txt");
        assert!(findings.is_empty());
    }
}
