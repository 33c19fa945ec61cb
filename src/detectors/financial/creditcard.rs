/// Credit card detector with Luhn pre-filtering
///
/// Detects Visa, Mastercard, American Express, and generic 13-19 digit
/// card numbers. The Luhn check runs as a pre-filter so random digit runs
/// never surface as findings.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use crate::utils::checksum::validate_luhn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static VISA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b4\d{3}[ \-]?\d{4}[ \-]?\d{4}[ \-]?\d{4}\b")
        .expect("Failed to compile Visa regex")
});

static MASTERCARD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b5[1-5]\d{2}[ \-]?\d{4}[ \-]?\d{4}[ \-]?\d{4}\b")
        .expect("Failed to compile Mastercard regex")
});

static AMEX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b3[47]\d{2}[ \-]?\d{6}[ \-]?\d{5}\b").expect("Failed to compile Amex regex")
});

static GENERIC_CARD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}[ \-]?\d{4}[ \-]?\d{4}[ \-]?\d{1,7}\b")
        .expect("Failed to compile generic card regex")
});

pub struct CreditCardDetector {
    validators: Arc<ValidatorRegistry>,
}

impl CreditCardDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }
}

impl Detector for CreditCardDetector {
    fn name(&self) -> &str {
        "credit_card"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings: Vec<Finding> = Vec::new();

        let patterns = [
            &*VISA_PATTERN,
            &*MASTERCARD_PATTERN,
            &*AMEX_PATTERN,
            &*GENERIC_CARD_PATTERN,
        ];

        for pattern in &patterns {
            for capture in pattern.find_iter(text) {
                let digits: String = capture
                    .as_str()
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();

                if !validate_luhn(&digits) {
                    continue;
                }

                findings.push(build_finding(
                    text,
                    capture.start(),
                    capture.end(),
                    PIType::CreditCard,
                    self.name(),
                    file_name,
                    &self.validators,
                ));
            }
        }

        // Same card found by multiple patterns
        findings.sort_by_key(|f| f.start_byte);
        findings.dedup_by_key(|f| f.start_byte);

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Detects credit card numbers (Visa, Mastercard, American Express, \
             generic 13-19 digit). Luhn validation runs as a pre-filter."
                .to_string(),
        )
    }
}
