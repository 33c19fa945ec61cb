/// Scan coordination: discovery, job construction, fan-out, aggregation
///
/// Owns a single repository scan end to end. File bytes are read here,
/// not in workers; workers receive already-loaded buffers. Per-file
/// failures accumulate into the result's error list and never abort the
/// scan; a missing root or unwritable output path is fatal.
use crate::config::Config;
use crate::context::ContextValidator;
use crate::core::{CancelToken, FileJob, RepositoryInfo, ScanResult, ScanSummary, CANCELLED};
use crate::detectors::secrets::SecretsDetector;
use crate::discovery::{DiscoveryError, Walker};
use crate::pipeline::{FileExecutor, WorkerPool};
use crate::risk::{CoOccurrencePolicy, EnvMultipliers, RiskScorer, RiskThresholds};
use crate::{default_detectors, default_validators};
use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

pub struct ScanCoordinator {
    config: Arc<Config>,
    cancel: CancelToken,
    show_progress: bool,
}

impl ScanCoordinator {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
            show_progress: true,
        }
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Token observed by discovery, submission, and every worker
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn build_scorer(&self) -> RiskScorer {
        let risk = &self.config.risk;
        RiskScorer::new(
            RiskThresholds {
                critical: risk.thresholds.critical,
                high: risk.thresholds.high,
                medium: risk.thresholds.medium,
                low: risk.thresholds.low,
            },
            EnvMultipliers {
                production: risk.multipliers.production,
                staging: risk.multipliers.staging,
                development: risk.multipliers.development,
                test: risk.multipliers.test,
            },
            CoOccurrencePolicy {
                enabled: risk.co_occurrence.enabled,
                proximity_columns: risk.co_occurrence.proximity_window,
                proximity_lines: self.config.scanner.proximity_distance,
                min_occurrences: risk.co_occurrence.min_occurrences,
            },
        )
    }

    fn build_executor(&self) -> Result<Arc<FileExecutor>> {
        let validators = Arc::new(default_validators());
        let mut detectors = default_detectors(&validators);

        // Per-type tuning: a disabled validator key switches the matching
        // detector off entirely
        let tuning = &self.config.scanner.validators;
        detectors.retain(|d| tuning.get(d.name()).map(|t| t.enabled).unwrap_or(true));

        let secrets = match self.config.scanner.secrets_rules {
            Some(ref path) => SecretsDetector::from_file(path, Arc::clone(&validators))
                .with_context(|| format!("Failed to load secrets rules: {}", path.display()))?,
            None => SecretsDetector::builtin(Arc::clone(&validators)),
        };
        detectors.push(Arc::new(secrets));

        let executor = FileExecutor::new(detectors, ContextValidator::new(), self.build_scorer())
            .exclude_paths(&self.config.scanner.exclude_paths)
            .max_file_size(self.config.scanner.max_file_size);

        Ok(Arc::new(executor))
    }

    /// Run one scan over a local working tree
    pub fn scan(&self, mut repository: RepositoryInfo, root: &Path) -> Result<ScanResult> {
        let scan_started = Utc::now();
        let timer = Instant::now();
        let mut errors: Vec<String> = Vec::new();

        info!("scanning {}", root.display());

        let walker = Walker::new(root)
            .file_types(&self.config.scanner.file_types)?
            .exclude_paths(&self.config.scanner.exclude_paths)?
            .max_file_size(self.config.scanner.max_file_size)
            .exclude_binary(true);

        let records = match walker.walk(&self.cancel) {
            Ok(records) => records,
            Err(DiscoveryError::Cancelled) => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        let total_files = records.len();
        let total_size: u64 = records.iter().map(|r| r.size).sum();
        info!("discovered {} candidate files", total_files);

        // Read bytes in the coordinator; workers get loaded buffers
        let mut jobs = Vec::with_capacity(records.len());
        let mut skipped_files = 0usize;

        for record in records {
            if self.cancel.is_cancelled() {
                break;
            }

            if record.is_binary {
                skipped_files += 1;
                continue;
            }

            let absolute = root.join(&record.path);
            match fs::read(&absolute) {
                Ok(bytes) => {
                    let content = String::from_utf8_lossy(&bytes).into_owned();
                    jobs.push(FileJob {
                        path: record.path.clone(),
                        content,
                        record,
                    });
                }
                Err(err) => {
                    warn!("cannot read {}: {}", record.path.display(), err);
                    errors.push(format!("{}: {}", record.path.display(), err));
                    skipped_files += 1;
                }
            }
        }

        let workers = self.config.scanner.workers;
        let capacity = (workers * 16).max(64);
        let executor = self.build_executor()?;
        let mut pool = WorkerPool::new(executor, workers, capacity);
        pool.start(self.cancel.clone()).context("worker pool failed")?;

        let progress = if self.show_progress && !jobs.is_empty() {
            let pb = ProgressBar::new(jobs.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({per_sec})",
                    )
                    .unwrap()
                    .progress_chars("█▓▒░  "),
            );
            Some(pb)
        } else {
            None
        };

        let job_count = jobs.len();

        // Drain results concurrently so submission never deadlocks on a
        // full result queue
        let result_rx = pool.results().clone();
        let drain_progress = progress.clone();
        let drainer = std::thread::spawn(move || {
            let mut collected = Vec::with_capacity(job_count);
            while let Ok(result) = result_rx.recv() {
                if let Some(ref pb) = drain_progress {
                    pb.inc(1);
                }
                collected.push(result);
            }
            collected
        });

        for job in jobs {
            if self.cancel.is_cancelled() {
                break;
            }
            if pool.submit(job).is_err() {
                break;
            }
        }
        pool.close();
        pool.join();

        let results = drainer
            .join()
            .map_err(|_| anyhow::anyhow!("result drain thread panicked"))?;

        if let Some(ref pb) = progress {
            pb.finish_and_clear();
        }

        let scanned_files = results.iter().filter(|r| r.error.is_none()).count();
        let mut findings = Vec::new();
        let mut processing_time_ns = 0u64;

        for result in &results {
            processing_time_ns += result.stats.processing_time_ns;
            if let Some(ref err) = result.error {
                if err != CANCELLED {
                    errors.push(format!("{}: {}", result.path.display(), err));
                    skipped_files += 1;
                }
            }
        }
        for result in results {
            findings.extend(result.findings);
        }

        // Deterministic artefact ordering across the unordered result stream
        findings.sort_by(|a, b| {
            (a.file.as_str(), a.line, a.column).cmp(&(b.file.as_str(), b.line, b.column))
        });

        if self.cancel.is_cancelled() {
            errors.push(CANCELLED.to_string());
            info!(
                "scan cancelled: {}/{} files completed",
                scanned_files, job_count
            );
        }

        let scan_finished = Utc::now();
        repository.file_count = total_files;
        repository.size = total_size;

        let mut result = ScanResult {
            repository,
            scan_started,
            scan_finished,
            duration: timer.elapsed().as_nanos() as u64,
            files_scanned: scanned_files,
            findings,
            stats: ScanSummary {
                total_files,
                scanned_files,
                skipped_files,
                total_size,
                total_findings: 0,
                findings_by_type: Default::default(),
                findings_by_risk: Default::default(),
                processing_time_ns,
            },
            errors,
            error: None,
        };
        result.rebuild_summary();

        info!(
            "scan finished: {} findings across {} files",
            result.stats.total_findings, result.files_scanned
        );

        Ok(result)
    }

    /// Serialise a scan result as JSON to the given path
    pub fn write_results(result: &ScanResult, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(result).context("Failed to serialise results")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        Ok(())
    }
}
