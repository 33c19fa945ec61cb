/// Australian phone number detector
///
/// Covers the three common written forms: mobiles ("0412 345 678"),
/// landlines with an area code ("(02) 9374 4000"), and international
/// format ("+61 412 345 678"). No validator exists for phone numbers;
/// matches carry pattern-only confidence.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Mobile, landline, and international alternates
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        \+61(?:[\x20\-]?\d){9}                       # +61 412 345 678
        | \(0[2-8]\)\x20?\d{4}[\x20\-]?\d{4}          # (02) 9374 4000
        | \b04\d{2}[\x20\-]?\d{3}[\x20\-]?\d{3}\b       # 0412 345 678
        ",
    )
    .expect("Failed to compile phone regex")
});

pub struct AuPhoneDetector {
    validators: Arc<ValidatorRegistry>,
}

impl AuPhoneDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }

    /// Pre-filter: 9-11 digits once separators are stripped
    fn pre_filter(matched: &str) -> bool {
        let digit_count = matched.chars().filter(|c| c.is_ascii_digit()).count();
        (9..=11).contains(&digit_count)
    }
}

impl Detector for AuPhoneDetector {
    fn name(&self) -> &str {
        "au_phone"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in PHONE_PATTERN.find_iter(text) {
            if !Self::pre_filter(capture.as_str()) {
                continue;
            }

            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Phone,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Detects Australian phone numbers: 04xx mobiles, (0x) landlines, \
             and +61 international format."
                .to_string(),
        )
    }
}
