/// Context validation for raw findings
///
/// Runs on every finding after detection. Never re-runs detection regex;
/// it looks only at the file's path and the captured context window to
/// decide whether a match is trustworthy, suppressed, or somewhere in
/// between. Pure and deterministic: identical input always produces the
/// identical decision.
use crate::core::Finding;
use globset::{Glob, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;

/// Outcome of validating one finding's context
#[derive(Debug, Clone, PartialEq)]
pub struct ContextDecision {
    /// False drops the finding entirely
    pub is_valid: bool,

    /// Replacement confidence for the finding
    pub confidence: f32,

    /// Classification of the surrounding context
    pub context_label: String,

    /// Human-readable reason for the decision
    pub reason: String,

    /// Adjusted context modifier
    pub context_modifier: f32,
}

/// Path-derived classification of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Test,
    Mock,
    Example,
    Vendor,
    Documentation,
    Production,
}

impl PathClass {
    /// Context modifier contributed by the path alone
    pub fn modifier(self) -> f32 {
        match self {
            PathClass::Test | PathClass::Mock => 0.1,
            PathClass::Vendor => 0.2,
            PathClass::Example => 0.25,
            PathClass::Documentation => 0.3,
            PathClass::Production => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PathClass::Test => "test",
            PathClass::Mock => "mock",
            PathClass::Example => "example",
            PathClass::Vendor => "vendor",
            PathClass::Documentation => "documentation",
            PathClass::Production => "production",
        }
    }
}

/// Words that mark surrounding text as synthetic test data
const TEST_DATA_INDICATORS: &[&str] = &[
    "test", "mock", "fake", "dummy", "example", "fixture", "sample", "placeholder", "lorem",
];

/// Labels that mark surrounding text as a deliberate PI field
const PI_LABELS: &[&str] = &[
    "tfn", "tax file", "medicare", "abn", "acn", "bsb", "customer", "patient", "employee",
    "account", "payee", "cardholder",
];

/// Company-number keywords used by the pipeline to break ACN/TFN ties
pub const COMPANY_KEYWORDS: &[&str] = &["acn", "company", "a.c.n"];

fn glob_set(patterns: &[&str]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).expect("invalid context glob"));
    }
    builder.build().expect("invalid context glob set")
}

static TEST_GLOBS: Lazy<GlobSet> = Lazy::new(|| {
    glob_set(&[
        "**/test/**",
        "**/tests/**",
        "**/spec/**",
        "**/*_test.*",
        "**/*_spec.*",
        "**/*.test.*",
        "**/*.spec.*",
        "**/testdata/**",
    ])
});

static MOCK_GLOBS: Lazy<GlobSet> =
    Lazy::new(|| glob_set(&["**/mock/**", "**/mocks/**", "**/*mock*.*", "**/stub/**"]));

static EXAMPLE_GLOBS: Lazy<GlobSet> = Lazy::new(|| {
    glob_set(&[
        "**/example/**",
        "**/examples/**",
        "**/demo/**",
        "**/demos/**",
        "**/sample/**",
        "**/samples/**",
    ])
});

static VENDOR_GLOBS: Lazy<GlobSet> = Lazy::new(|| {
    glob_set(&[
        "**/vendor/**",
        "**/node_modules/**",
        "**/third_party/**",
        "**/.git/**",
    ])
});

static DOC_GLOBS: Lazy<GlobSet> = Lazy::new(|| {
    glob_set(&["**/doc/**", "**/docs/**", "**/*.md", "**/*.rst", "**/README*"])
});

/// State-free context validator; shareable across workers without locks
#[derive(Debug, Default, Clone)]
pub struct ContextValidator;

impl ContextValidator {
    pub fn new() -> Self {
        Self
    }

    /// Classify a repo-relative path
    pub fn classify_path(&self, path: &str) -> PathClass {
        if TEST_GLOBS.is_match(path) {
            PathClass::Test
        } else if MOCK_GLOBS.is_match(path) {
            PathClass::Mock
        } else if EXAMPLE_GLOBS.is_match(path) {
            PathClass::Example
        } else if VENDOR_GLOBS.is_match(path) {
            PathClass::Vendor
        } else if DOC_GLOBS.is_match(path) {
            PathClass::Documentation
        } else {
            PathClass::Production
        }
    }

    /// Validate a finding against its path and lexical context
    pub fn validate(&self, finding: &Finding, rel_path: &str) -> ContextDecision {
        let digits: String = finding
            .matched
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        // Uniform digit runs are synthetic fillers, checksum-valid or not
        if digits.len() >= 6 && digits.chars().all(|c| c == digits.chars().next().unwrap()) {
            return ContextDecision {
                is_valid: false,
                confidence: 0.0,
                context_label: "placeholder".to_string(),
                reason: "uniform digit run is a synthetic filler".to_string(),
                context_modifier: 0.0,
            };
        }

        let class = self.classify_path(rel_path);
        let mut modifier = class.modifier();
        let mut confidence = finding.confidence;
        let mut label = class.label().to_string();
        let mut reason = format!("{} path", class.label());

        let window = format!(
            "{}{}{}",
            finding.context_before, finding.matched, finding.context_after
        );
        let window_lower = window.to_lowercase();

        // Comment-dominated line: the text before the match on its own line
        let line_before = finding
            .context_before
            .rsplit('\n')
            .next()
            .unwrap_or("")
            .trim_start();
        let in_comment = line_before.starts_with("//")
            || line_before.starts_with('#')
            || line_before.starts_with("/*")
            || line_before.starts_with('*')
            || line_before.contains("// ");
        if in_comment && class == PathClass::Production {
            modifier = modifier.min(0.3);
            label = "documentation".to_string();
            reason = "comment context".to_string();
        }

        // Ascending placeholder sequence: strongly de-rated but kept
        if digits.contains("123456789") {
            modifier = modifier.min(0.3);
            reason = "sequential digit placeholder".to_string();
        }

        let has_test_indicator = TEST_DATA_INDICATORS
            .iter()
            .any(|word| window_lower.contains(word));
        if has_test_indicator {
            modifier = modifier.min(0.1);
            confidence *= 0.5;
            reason = "test data indicator in context".to_string();
        } else {
            // PI labels uphold the finding; ambiguous matches gain
            // confidence. A match a validator already rejected is not
            // ambiguous and keeps its reduced confidence.
            let labelled = PI_LABELS.iter().any(|word| window_lower.contains(word))
                || finding.context_before.trim_end().ends_with(':')
                || finding.context_before.trim_end().ends_with('=');
            if labelled {
                if confidence <= 0.8 && finding.validation_error.is_empty() {
                    confidence = (confidence + 0.2).min(1.0);
                }
                if reason.ends_with("path") {
                    reason = "labelled pi field".to_string();
                }
            }
        }

        // Form-field / config markers
        if window_lower.contains("name=\"")
            || window_lower.contains("<input")
            || window_lower.contains("\"field\":")
        {
            label = "form".to_string();
        }

        ContextDecision {
            is_valid: true,
            confidence: confidence.clamp(0.0, 1.0),
            context_label: label,
            reason,
            context_modifier: modifier.clamp(0.0, 1.0),
        }
    }
}
