/// Personal name heuristic detector
///
/// Two adjacent capitalised words form a candidate. This is inherently
/// noisy in prose and code alike, so a stoplist removes the common
/// capitalised-pair false positives (place names, headings, API nouns).
/// The detector matters mostly as a co-occurrence partner: a name next to
/// a TFN or address escalates the cluster.
use crate::core::{Detector, Finding, PIType, ValidatorRegistry};
use crate::detectors::build_finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]{1,19} [A-Z][a-z]{1,19}\b").expect("Failed to compile name regex")
});

/// Capitalised words that start far more headings than surnames
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "The", "This", "That", "These", "Those", "New", "Old", "North", "South", "East", "West",
        "Main", "High", "Great", "Little", "Upper", "Lower", "Hello", "World", "About", "Contact",
        "Home", "Page", "Next", "Last", "First", "Index", "Error", "Warning", "Notice", "Public",
        "Private", "Internal", "External", "Api", "Http", "Json", "Yaml", "Config", "Default",
        "True", "False", "None", "Null", "String", "Number", "Object", "Array", "Value", "Key",
        "File", "Path", "Test", "Mock", "Example", "Sample", "User", "Admin", "Account", "Street",
        "Road", "Avenue", "Suite", "Level", "Unit",
    ]
    .into_iter()
    .collect()
});

pub struct NameDetector {
    validators: Arc<ValidatorRegistry>,
}

impl NameDetector {
    pub fn new(validators: Arc<ValidatorRegistry>) -> Self {
        Self { validators }
    }

    /// Pre-filter: neither word may be a stoplisted heading word
    fn pre_filter(matched: &str) -> bool {
        matched.split(' ').all(|word| !STOPWORDS.contains(word))
    }
}

impl Detector for NameDetector {
    fn name(&self) -> &str {
        "name"
    }

    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for capture in NAME_PATTERN.find_iter(text) {
            if !Self::pre_filter(capture.as_str()) {
                continue;
            }

            findings.push(build_finding(
                text,
                capture.start(),
                capture.end(),
                PIType::Name,
                self.name(),
                file_name,
                &self.validators,
            ));
        }

        findings
    }

    fn description(&self) -> Option<String> {
        Some(
            "Heuristic personal-name detector (adjacent capitalised words \
             with a stoplist). Primarily a co-occurrence signal."
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_validators;

    fn detector() -> NameDetector {
        NameDetector::new(Arc::new(default_validators()))
    }

    #[test]
    fn test_plain_name() {
        let findings = detector().detect("customer Jane Citizen opened an account", "crm.txt");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].matched, "Jane Citizen");
        assert_eq!(findings[0].pi_type, PIType::Name);
    }

    #[test]
    fn test_stopword_pairs_filtered() {
        let findings = detector().detect("The Example shows New South config", "readme.md");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_lowercase_words_not_matched() {
        let findings = detector().detect("jane citizen logged in", "log.txt");
        assert!(findings.is_empty());
    }
}
