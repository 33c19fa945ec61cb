/// Per-file detection pipeline
///
/// Runs every detector over a job's content in a deterministic order,
/// resolves cross-detector overlaps, applies context validation and risk
/// scoring, deduplicates, and emits exactly one `ProcessingResult`.
use crate::context::{ContextValidator, COMPANY_KEYWORDS};
use crate::core::{
    CancelToken, Detector, FileJob, Finding, PIType, ProcessingResult, CANCELLED,
};
use crate::risk::RiskScorer;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::trace;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

pub struct FileExecutor {
    detectors: Vec<Arc<dyn Detector>>,
    context: ContextValidator,
    scorer: RiskScorer,
    exclude_globs: GlobSet,
    exclude_substrings: Vec<String>,
    max_file_size: u64,
}

impl FileExecutor {
    pub fn new(
        detectors: Vec<Arc<dyn Detector>>,
        context: ContextValidator,
        scorer: RiskScorer,
    ) -> Self {
        Self {
            detectors,
            context,
            scorer,
            exclude_globs: GlobSet::empty(),
            exclude_substrings: Vec::new(),
            max_file_size: 10 * 1024 * 1024,
        }
    }

    /// Paths matching any entry (glob or substring) yield zero findings
    pub fn exclude_paths(mut self, entries: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut substrings = Vec::new();

        for entry in entries {
            if entry.contains('*') || entry.contains('?') || entry.contains('[') {
                if let Ok(glob) = Glob::new(entry) {
                    builder.add(glob);
                }
            } else {
                substrings.push(entry.clone());
            }
        }

        if let Ok(set) = builder.build() {
            self.exclude_globs = set;
        }
        self.exclude_substrings = substrings;
        self
    }

    pub fn max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    fn excluded(&self, rel: &str) -> bool {
        if self.exclude_globs.is_match(rel) {
            return true;
        }
        self.exclude_substrings.iter().any(|s| rel.contains(s))
    }

    /// Process one job. Never returns an error up the stack: failures are
    /// folded into the result's `error` field.
    pub fn process(&self, job: &FileJob, cancel: &CancelToken) -> ProcessingResult {
        let start = Instant::now();
        let rel_path = job.path.to_string_lossy().replace('\\', "/");

        if cancel.is_cancelled() {
            return ProcessingResult::with_error(job.path.clone(), CANCELLED.to_string());
        }

        if job.content.len() as u64 > self.max_file_size {
            return ProcessingResult::with_error(
                job.path.clone(),
                format!(
                    "file exceeds maximum size ({} > {} bytes)",
                    job.content.len(),
                    self.max_file_size
                ),
            );
        }

        let mut result = ProcessingResult::new(job.path.clone());
        result.stats.bytes_processed = job.content.len() as u64;
        result.stats.lines_processed = job.content.lines().count() as u64;

        if self.excluded(&rel_path) {
            result.stats.processing_time_ns = start.elapsed().as_nanos() as u64;
            return result;
        }

        let mut raw: Vec<Finding> = Vec::new();
        for detector in &self.detectors {
            // Cancellation point between successive detectors
            if cancel.is_cancelled() {
                result.error = Some(CANCELLED.to_string());
                result.stats.processing_time_ns = start.elapsed().as_nanos() as u64;
                return result;
            }

            let findings = detector.detect(&job.content, &rel_path);
            trace!(
                "{}: detector {} produced {} findings",
                rel_path,
                detector.name(),
                findings.len()
            );
            raw.extend(findings);
        }

        let resolved = resolve_overlaps(raw);

        let mut validated: Vec<Finding> = Vec::new();
        for mut finding in resolved {
            let decision = self.context.validate(&finding, &rel_path);
            if !decision.is_valid {
                continue;
            }
            finding.confidence = decision.confidence;
            finding.context_modifier = decision.context_modifier;
            validated.push(finding);
        }

        for finding in validated.iter_mut() {
            finding.file = rel_path.clone();
            self.scorer.score(finding);
        }
        self.scorer.apply_co_occurrence(&mut validated);

        // Deduplicate across detectors, then order per-file by position
        let mut seen = HashSet::new();
        validated.retain(|f| seen.insert(f.dedup_key()));
        validated.sort_by_key(|f| (f.line, f.column));

        result.findings = validated;
        result.stats.processing_time_ns = start.elapsed().as_nanos() as u64;
        result
    }
}

/// Drop findings whose byte range intersects an earlier-accepted finding
/// from a different detector. Detector registration order is the
/// tie-break, with one exception: an ACN candidate replaces an accepted
/// TFN over the same range when the surrounding text names a company
/// number.
fn resolve_overlaps(findings: Vec<Finding>) -> Vec<Finding> {
    let mut accepted: Vec<Finding> = Vec::new();

    'next: for finding in findings {
        for existing in accepted.iter_mut() {
            if !existing.overlaps(&finding) || existing.detector_name == finding.detector_name {
                continue;
            }

            if existing.pi_type == PIType::Tfn && finding.pi_type == PIType::Acn {
                let window = format!("{}{}", finding.context_before, finding.context_after)
                    .to_lowercase();
                if COMPANY_KEYWORDS.iter().any(|k| window.contains(k)) {
                    *existing = finding;
                }
            }
            continue 'next;
        }
        accepted.push(finding);
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileRecord, RiskLevel};
    use crate::{default_detectors, default_validators};
    use std::path::PathBuf;

    fn executor() -> FileExecutor {
        let validators = Arc::new(default_validators());
        FileExecutor::new(
            default_detectors(&validators),
            ContextValidator::new(),
            RiskScorer::default(),
        )
    }

    fn job(path: &str, content: &str) -> FileJob {
        FileJob {
            path: PathBuf::from(path),
            content: content.to_string(),
            record: FileRecord {
                path: PathBuf::from(path),
                size: content.len() as u64,
                is_binary: false,
                is_hidden: false,
            },
        }
    }

    #[test]
    fn test_valid_tfn_in_production_file() {
        let result = executor().process(
            &job("customer.go", "const customerTFN = \"123456782\""),
            &CancelToken::new(),
        );

        assert!(result.error.is_none());
        assert_eq!(result.findings.len(), 1);

        let f = &result.findings[0];
        assert_eq!(f.pi_type, PIType::Tfn);
        assert_eq!(f.matched, "123456782");
        assert_eq!(f.line, 1);
        assert!(f.validated);
        assert!((f.confidence - 0.95).abs() < f32::EPSILON);
        assert!((f.context_modifier - 1.0).abs() < f32::EPSILON);
        assert!(f.risk_level >= RiskLevel::High);
    }

    #[test]
    fn test_invalid_tfn_checksum_demoted() {
        let result = executor().process(&job("main.go", "tfn := \"123456789\""), &CancelToken::new());

        assert_eq!(result.findings.len(), 1);
        let f = &result.findings[0];
        assert_eq!(f.pi_type, PIType::Tfn);
        assert!(!f.validated);
        assert!(!f.validation_error.is_empty());
        assert!((f.confidence - 0.5).abs() < f32::EPSILON);
        assert!(f.risk_level <= RiskLevel::Medium);
    }

    #[test]
    fn test_telstra_abn() {
        let result = executor().process(&job("billing.go", "abn := \"33051775556\""), &CancelToken::new());

        assert_eq!(result.findings.len(), 1);
        let f = &result.findings[0];
        assert_eq!(f.pi_type, PIType::Abn);
        assert!(f.validated);
        assert!((f.confidence - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bsb_invalid_state_digit() {
        let result = executor().process(&job("pay.go", "bsb := \"068-000\""), &CancelToken::new());

        assert_eq!(result.findings.len(), 1);
        let f = &result.findings[0];
        assert_eq!(f.pi_type, PIType::Bsb);
        assert!(!f.validated);
    }

    #[test]
    fn test_test_file_suppression() {
        let result = executor().process(
            &job("customer_test.go", "testTFN := \"123456782\""),
            &CancelToken::new(),
        );

        assert_eq!(result.findings.len(), 1);
        let f = &result.findings[0];
        assert!(f.context_modifier <= 0.1);
        assert_eq!(f.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_co_occurrence_cluster_promoted() {
        let content = "customer Jane Citizen\nlives at 42 Wallaby Way\ntfn: 123456782\n";
        let result = executor().process(&job("src/customer.go", content), &CancelToken::new());

        let types: Vec<_> = result.findings.iter().map(|f| f.pi_type.clone()).collect();
        assert!(types.contains(&PIType::Name));
        assert!(types.contains(&PIType::Address));
        assert!(types.contains(&PIType::Tfn));

        for f in &result.findings {
            assert_eq!(f.risk_level, RiskLevel::Critical, "finding: {:?}", f.pi_type);
        }
    }

    #[test]
    fn test_abn_wins_over_embedded_tfn() {
        // The grouped ABN contains a 9-digit run the TFN matcher also sees
        let result = executor().process(
            &job("billing.go", "ABN: 51 824 753 556 on invoice"),
            &CancelToken::new(),
        );

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].pi_type, PIType::Abn);
    }

    #[test]
    fn test_acn_preferred_with_company_context() {
        // 004085616 passes both the ACN and (not) TFN checksum paths; the
        // keyword decides which survives when both match the same range
        let result = executor().process(
            &job("company.go", "registered company ACN 010 499 966"),
            &CancelToken::new(),
        );

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].pi_type, PIType::Acn);
    }

    #[test]
    fn test_path_exclusion_yields_no_findings() {
        let exec = executor().exclude_paths(&["vendor".to_string()]);
        let result = exec.process(
            &job("vendor/lib.go", "tfn := \"123456782\""),
            &CancelToken::new(),
        );

        assert!(result.error.is_none());
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_size_cap_is_recoverable_error() {
        let exec = executor().max_file_size(10);
        let result = exec.process(
            &job("big.go", "this content is longer than ten bytes"),
            &CancelToken::new(),
        );

        assert!(result.error.is_some());
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_findings_sorted_by_position() {
        let content = "email: a@b.com\ntfn: 123456782\nbsb: 062-000\n";
        let result = executor().process(&job("src/a.go", content), &CancelToken::new());

        let positions: Vec<_> = result.findings.iter().map(|f| (f.line, f.column)).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_cancellation_reports_marker() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = executor().process(&job("a.go", "tfn := \"123456782\""), &cancel);
        assert_eq!(result.error.as_deref(), Some(CANCELLED));
    }

    #[test]
    fn test_idempotent_pipeline() {
        let content = "tfn: 123456782, bsb 062-000, email a@b.co";
        let exec = executor();

        let first = exec.process(&job("src/a.go", content), &CancelToken::new());
        let second = exec.process(&job("src/a.go", content), &CancelToken::new());

        let strip = |r: &ProcessingResult| -> Vec<_> {
            r.findings
                .iter()
                .map(|f| {
                    (
                        f.pi_type.clone(),
                        f.matched.clone(),
                        f.line,
                        f.column,
                        f.risk_level,
                        f.validated,
                    )
                })
                .collect()
        };
        assert_eq!(strip(&first), strip(&second));
    }

    #[test]
    fn test_stats_populated() {
        let result = executor().process(&job("a.go", "line one\nline two\n"), &CancelToken::new());
        assert_eq!(result.stats.bytes_processed, 18);
        assert_eq!(result.stats.lines_processed, 2);
    }
}
