/// Email address detector
///
/// Practical RFC 5322-inspired pattern; covers the overwhelming majority
/// of real-world addresses without the full grammar.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}\b")
        .expect("Failed to compile email regex")
});

pub struct EmailDetector {
    validators: Arc<ValidatorRegistry>,
}

impl EmailDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }
}

impl Detector for EmailDetector {
    fn name(&self) -> &str {
        "email"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in EMAIL_PATTERN.find_iter(text) {
            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Email,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some("Detects email addresses using a practical RFC 5322-inspired pattern.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_validators;

    fn detector() -> EmailDetector {
        EmailDetector::new(Arc::new(default_validators()))
    }

    #[test]
    fn test_simple_email() {
        let findings = detector().detect("Contact: jane.citizen@example.com.au", "contact.txt");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].matched, "jane.citizen@example.com.au");
        assert!((findings[0].confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_multiple_emails() {
        let findings = detector().detect("alice@example.com, bob@test.org", "users.txt");
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_email_with_plus_tag() {
        let findings = detector().detect("user+tag@example.com", "a.txt");
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_no_match_on_plain_text() {
        let findings = detector().detect("no emails here at all", "a.txt");
        assert!(findings.is_empty());
    }
}
