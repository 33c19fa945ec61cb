/// Street address heuristic detector
///
/// Matches "<number> <Name> <street type>" with the street types common
/// in Australian addressing. Like the name heuristic, this exists mainly
/// as a co-occurrence partner for identifier findings.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        \b\d{1,5}[a-zA-Z]?\s
        (?:[A-Z][a-z]+\s){1,3}
        (?:Street|St|Road|Rd|Avenue|Ave|Drive|Dr|Court|Ct|Place|Pl|Lane|Ln
          |Parade|Pde|Crescent|Cres|Highway|Hwy|Terrace|Tce|Boulevard|Blvd
          |Circuit|Cct|Esplanade|Grove|Way)\b
        ",
    )
    .expect("Failed to compile address regex")
});

pub struct AddressDetector {
    validators: Arc<ValidatorRegistry>,
}

impl AddressDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }
}

impl Detector for AddressDetector {
    fn name(&self) -> &str {
        "address"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in ADDRESS_PATTERN.find_iter(text) {
            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Address,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Heuristic street-address detector (number + name + street type). \
             Primarily a co-occurrence signal."
                .to_string(),
        )
    }
}
