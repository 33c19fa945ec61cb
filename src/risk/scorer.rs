/// Risk scoring: type weights, validation bumps, context damping,
/// environment multipliers, and the co-occurrence boost
use crate::core::{Finding, PIType, RiskLevel};
use std::collections::HashSet;

/// Sorted score thresholds for mapping multiplied scores back to levels
#[derive(Debug, Clone, Copy)]
pub struct RiskThresholds {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical: 0.8,
            high: 0.6,
            medium: 0.4,
            low: 0.2,
        }
    }
}

/// Environment multipliers applied from path markers
#[derive(Debug, Clone, Copy)]
pub struct EnvMultipliers {
    pub production: f64,
    pub staging: f64,
    pub development: f64,
    pub test: f64,
}

impl Default for EnvMultipliers {
    fn default() -> Self {
        Self {
            production: 1.5,
            staging: 1.2,
            development: 0.8,
            test: 0.5,
        }
    }
}

/// Co-occurrence boost settings
#[derive(Debug, Clone, Copy)]
pub struct CoOccurrencePolicy {
    pub enabled: bool,
    /// Column distance considered "nearby" on the same line
    pub proximity_columns: usize,
    /// Line distance considered "nearby"
    pub proximity_lines: usize,
    /// Distinct high-sensitivity types required to trigger the boost
    pub min_occurrences: usize,
}

impl Default for CoOccurrencePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            proximity_columns: 50,
            proximity_lines: 5,
            min_occurrences: 2,
        }
    }
}

/// Deployment environment inferred from a file's path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Staging,
    Development,
    Test,
    Unknown,
}

/// Classify a path by well-known environment markers
pub fn classify_environment(path: &str) -> Environment {
    let lower = path.to_lowercase();

    if lower.contains("test") || lower.contains("spec") {
        Environment::Test
    } else if lower.contains("staging") || lower.contains("stage") {
        Environment::Staging
    } else if lower.contains("prod") {
        Environment::Production
    } else if lower.contains("dev") {
        Environment::Development
    } else {
        Environment::Unknown
    }
}

/// Stateless scorer shared across workers
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer {
    pub thresholds: RiskThresholds,
    pub multipliers: EnvMultipliers,
    pub co_occurrence: CoOccurrencePolicy,
}

/// Whether the type has a registered identifier validator; only those
/// types take the validation bump or demotion
fn has_validator(pi_type: &PIType) -> bool {
    matches!(
        pi_type,
        PIType::Tfn | PIType::Abn | PIType::Acn | PIType::Medicare | PIType::Bsb
    )
}

impl RiskScorer {
    pub fn new(
        thresholds: RiskThresholds,
        multipliers: EnvMultipliers,
        co_occurrence: CoOccurrencePolicy,
    ) -> Self {
        Self {
            thresholds,
            multipliers,
            co_occurrence,
        }
    }

    /// Score a single finding: base weight, validation bump, context
    /// damping, environment multiplier. Co-occurrence runs separately
    /// over the whole file.
    pub fn score(&self, finding: &mut Finding) {
        let weight = finding.pi_type.base_weight();
        let mut level = if weight >= 90 {
            RiskLevel::High
        } else if weight >= 60 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        if has_validator(&finding.pi_type) {
            level = if finding.validated {
                level.promote()
            } else {
                level.demote()
            };
        }

        level = self.apply_environment(level, &finding.file);
        level = Self::damp(level, finding.context_modifier);

        finding.risk_level = level;
    }

    /// Multiplicative damping from the context modifier: <= 0.2 forces
    /// LOW, <= 0.5 prevents escalation above MEDIUM
    fn damp(level: RiskLevel, modifier: f32) -> RiskLevel {
        if modifier <= 0.2 {
            RiskLevel::Low
        } else if modifier <= 0.5 {
            level.min(RiskLevel::Medium)
        } else {
            level
        }
    }

    /// Scale the level's score by the environment multiplier and re-map
    /// through the thresholds. Never demotes below the unscaled level for
    /// multipliers >= 1 (monotonicity).
    fn apply_environment(&self, level: RiskLevel, path: &str) -> RiskLevel {
        let multiplier = match classify_environment(path) {
            Environment::Production => self.multipliers.production,
            Environment::Staging => self.multipliers.staging,
            Environment::Development => self.multipliers.development,
            Environment::Test => self.multipliers.test,
            Environment::Unknown => 1.0,
        };

        let scaled = level.score() * multiplier;
        let mapped = if scaled >= self.thresholds.critical {
            RiskLevel::Critical
        } else if scaled >= self.thresholds.high {
            RiskLevel::High
        } else if scaled >= self.thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        if multiplier >= 1.0 {
            mapped.max(level)
        } else {
            mapped
        }
    }

    /// Promote clusters of distinct high-sensitivity findings to CRITICAL.
    ///
    /// Two findings are nearby when they sit within the configured line
    /// distance, or on the same line within the column distance. Findings
    /// already suppressed by context (modifier <= 0.5) never participate.
    /// The boost is idempotent: promoting to CRITICAL twice is a no-op.
    pub fn apply_co_occurrence(&self, findings: &mut [Finding]) {
        if !self.co_occurrence.enabled || findings.len() < 2 {
            return;
        }

        let candidates: Vec<usize> = findings
            .iter()
            .enumerate()
            .filter(|(_, f)| f.pi_type.is_high_sensitivity() && f.context_modifier > 0.5)
            .map(|(i, _)| i)
            .collect();

        let mut promote = vec![false; findings.len()];

        for &i in &candidates {
            let mut types: HashSet<String> = HashSet::new();
            types.insert(findings[i].pi_type.tag());

            for &j in &candidates {
                if i != j && Self::nearby(&findings[i], &findings[j], &self.co_occurrence) {
                    types.insert(findings[j].pi_type.tag());
                }
            }

            if types.len() >= self.co_occurrence.min_occurrences {
                promote[i] = true;
            }
        }

        for (i, flagged) in promote.into_iter().enumerate() {
            if flagged {
                findings[i].risk_level = RiskLevel::Critical;
            }
        }
    }

    fn nearby(a: &Finding, b: &Finding, policy: &CoOccurrencePolicy) -> bool {
        let line_delta = a.line.abs_diff(b.line);

        if line_delta == 0 {
            a.column.abs_diff(b.column) <= policy.proximity_columns
        } else {
            line_delta <= policy.proximity_lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn finding(pi_type: PIType, validated: bool, modifier: f32, file: &str, line: usize) -> Finding {
        Finding {
            pi_type,
            matched: "123456782".to_string(),
            file: file.to_string(),
            line,
            column: 1,
            context_before: String::new(),
            context_after: String::new(),
            confidence: 0.95,
            context_modifier: modifier,
            risk_level: RiskLevel::Low,
            validated,
            validation_error: String::new(),
            detected_at: Utc::now(),
            detector_name: "tfn".to_string(),
            start_byte: 0,
            end_byte: 9,
        }
    }

    #[test]
    fn test_validated_tfn_in_production_is_at_least_high() {
        let scorer = RiskScorer::default();
        let mut f = finding(PIType::Tfn, true, 1.0, "src/customer.go", 1);

        scorer.score(&mut f);
        assert!(f.risk_level >= RiskLevel::High);
    }

    #[test]
    fn test_invalid_tfn_demoted() {
        let scorer = RiskScorer::default();
        let mut valid = finding(PIType::Tfn, true, 1.0, "src/a.go", 1);
        let mut invalid = finding(PIType::Tfn, false, 1.0, "src/a.go", 1);

        scorer.score(&mut valid);
        scorer.score(&mut invalid);
        assert!(invalid.risk_level < valid.risk_level);
    }

    #[test]
    fn test_low_modifier_forces_low() {
        let scorer = RiskScorer::default();
        let mut f = finding(PIType::Tfn, true, 0.1, "src/customer_test.go", 1);

        scorer.score(&mut f);
        assert_eq!(f.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_mid_modifier_caps_at_medium() {
        let scorer = RiskScorer::default();
        let mut f = finding(PIType::Tfn, true, 0.4, "src/customer.go", 1);

        scorer.score(&mut f);
        assert!(f.risk_level <= RiskLevel::Medium);
    }

    #[test]
    fn test_unvalidated_types_take_no_bump() {
        let scorer = RiskScorer::default();
        let mut f = finding(PIType::CreditCard, false, 1.0, "src/billing.go", 1);

        scorer.score(&mut f);
        // Weight 90 -> HIGH, no demotion despite validated=false
        assert!(f.risk_level >= RiskLevel::High);
    }

    #[test]
    fn test_production_path_escalates() {
        let scorer = RiskScorer::default();
        let mut prod = finding(PIType::Abn, true, 1.0, "config/prod/billing.go", 1);
        let mut plain = finding(PIType::Abn, true, 1.0, "billing.go", 1);

        scorer.score(&mut prod);
        scorer.score(&mut plain);
        assert!(prod.risk_level >= plain.risk_level);
    }

    #[test]
    fn test_environment_classification() {
        assert_eq!(classify_environment("deploy/prod/app.yaml"), Environment::Production);
        assert_eq!(classify_environment("deploy/staging/app.yaml"), Environment::Staging);
        assert_eq!(classify_environment("src/lib.rs"), Environment::Unknown);
        assert_eq!(classify_environment("tests/fixture.rs"), Environment::Test);
    }

    #[test]
    fn test_co_occurrence_promotes_cluster() {
        let scorer = RiskScorer::default();
        let mut findings = vec![
            finding(PIType::Name, false, 1.0, "src/customer.go", 1),
            finding(PIType::Address, false, 1.0, "src/customer.go", 2),
            finding(PIType::Tfn, true, 1.0, "src/customer.go", 3),
        ];

        for f in findings.iter_mut() {
            scorer.score(f);
        }
        scorer.apply_co_occurrence(&mut findings);

        assert!(findings
            .iter()
            .all(|f| f.risk_level == RiskLevel::Critical));
    }

    #[test]
    fn test_co_occurrence_needs_distinct_types() {
        let scorer = RiskScorer::default();
        let mut findings = vec![
            finding(PIType::Tfn, true, 1.0, "src/a.go", 1),
            finding(PIType::Tfn, true, 1.0, "src/a.go", 2),
        ];

        for f in findings.iter_mut() {
            scorer.score(f);
        }
        let before: Vec<RiskLevel> = findings.iter().map(|f| f.risk_level).collect();
        scorer.apply_co_occurrence(&mut findings);
        let after: Vec<RiskLevel> = findings.iter().map(|f| f.risk_level).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn test_co_occurrence_ignores_suppressed_findings() {
        let scorer = RiskScorer::default();
        let mut findings = vec![
            finding(PIType::Name, false, 0.1, "tests/a.go", 1),
            finding(PIType::Tfn, true, 0.1, "tests/a.go", 2),
        ];

        for f in findings.iter_mut() {
            scorer.score(f);
        }
        scorer.apply_co_occurrence(&mut findings);

        assert!(findings.iter().all(|f| f.risk_level != RiskLevel::Critical));
    }

    #[test]
    fn test_co_occurrence_outside_window_not_promoted() {
        let scorer = RiskScorer::default();
        let mut findings = vec![
            finding(PIType::Name, false, 1.0, "src/a.go", 1),
            finding(PIType::Tfn, true, 1.0, "src/a.go", 50),
        ];

        for f in findings.iter_mut() {
            scorer.score(f);
        }
        scorer.apply_co_occurrence(&mut findings);

        assert!(findings.iter().any(|f| f.risk_level != RiskLevel::Critical));
    }

    #[test]
    fn test_boost_is_idempotent() {
        let scorer = RiskScorer::default();
        let mut findings = vec![
            finding(PIType::Name, false, 1.0, "src/a.go", 1),
            finding(PIType::Tfn, true, 1.0, "src/a.go", 2),
        ];

        for f in findings.iter_mut() {
            scorer.score(f);
        }
        scorer.apply_co_occurrence(&mut findings);
        let first: Vec<RiskLevel> = findings.iter().map(|f| f.risk_level).collect();
        scorer.apply_co_occurrence(&mut findings);
        let second: Vec<RiskLevel> = findings.iter().map(|f| f.risk_level).collect();

        assert_eq!(first, second);
    }
}
