/// IPv4 address detector
///
/// Dotted-quad pattern with an octet-range pre-filter. Version strings
/// like "1.2.3.4" are indistinguishable at this layer; context validation
/// de-rates them when they sit in documentation or test fixtures.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static IP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("Failed to compile IP regex")
});

pub struct IpAddressDetector {
    validators: Arc<ValidatorRegistry>,
}

impl IpAddressDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }

    /// Pre-filter: every octet must be <= 255
    fn pre_filter(matched: &str) -> bool {
        matched
            .split('.')
            .all(|octet| octet.parse::<u32>().map(|n| n <= 255).unwrap_or(false))
    }
}

impl Detector for IpAddressDetector {
    fn name(&self) -> &str {
        "ip_address"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in IP_PATTERN.find_iter(text) {
            if !Self::pre_filter(capture.as_str()) {
                continue;
            }

            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::IpAddress,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some("Detects IPv4 addresses (dotted quad, octets 0-255).".to_string())
    }
}
