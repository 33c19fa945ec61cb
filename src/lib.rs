/// PI-Sentinel: risk-ranked personal information scanner for source repositories
///
/// Detects Australian regulatory identifiers (TFN, Medicare, ABN, ACN, BSB)
/// alongside generic PI and leaked secrets, validates them algorithmically,
/// suppresses test and fixture noise through context analysis, and emits a
/// risk-ranked JSON artefact for compliance review.
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod detectors;
pub mod discovery;
pub mod pipeline;
pub mod repo;
pub mod reporter;
pub mod risk;
pub mod scanner;
pub mod utils;
pub mod validators;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use context::{ContextDecision, ContextValidator, PathClass};
pub use self::core::{
    CancelToken, Detector, FileJob, FileRecord, Finding, PIType, ProcessingResult,
    RepositoryInfo, RiskLevel, ScanResult, ScanSummary, ValidationOutcome, Validator,
    ValidatorRegistry, CANCELLED,
};
pub use discovery::{DiscoveryError, Walker};
pub use pipeline::{FileExecutor, PoolError, PoolState, WorkerPool};
pub use reporter::{CsvReporter, HtmlReporter, SarifReporter, TerminalReporter};
pub use risk::{RiskScorer, RiskThresholds};
pub use scanner::ScanCoordinator;

use detectors::secrets::SecretsDetector;
use std::sync::Arc;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the registry of Australian identifier validators
pub fn default_validators() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();

    registry.register(Box::new(validators::TfnValidator::new()));
    registry.register(Box::new(validators::AbnValidator::new()));
    registry.register(Box::new(validators::AcnValidator::new()));
    registry.register(Box::new(validators::MedicareValidator::new()));
    registry.register(Box::new(validators::BsbValidator::new()));

    registry
}

/// Create the default pattern detector suite.
///
/// Order matters: the pipeline resolves cross-detector overlaps in
/// registration order, so ABN precedes TFN (both consume long digit runs
/// and ABN is strictly longer), TFN precedes ACN, and the address
/// heuristic precedes the name heuristic it would otherwise collide with.
pub fn default_detectors(validators: &Arc<ValidatorRegistry>) -> Vec<Arc<dyn Detector>> {
    vec![
        Arc::new(detectors::au::AbnDetector::new(Arc::clone(validators))),
        Arc::new(detectors::au::TfnDetector::new(Arc::clone(validators))),
        Arc::new(detectors::au::AcnDetector::new(Arc::clone(validators))),
        Arc::new(detectors::au::MedicareDetector::new(Arc::clone(validators))),
        Arc::new(detectors::au::BsbDetector::new(Arc::clone(validators))),
        Arc::new(detectors::financial::CreditCardDetector::new(Arc::clone(
            validators,
        ))),
        Arc::new(detectors::personal::EmailDetector::new(Arc::clone(
            validators,
        ))),
        Arc::new(detectors::au::AuPhoneDetector::new(Arc::clone(validators))),
        Arc::new(detectors::personal::AddressDetector::new(Arc::clone(
            validators,
        ))),
        Arc::new(detectors::personal::NameDetector::new(Arc::clone(
            validators,
        ))),
        Arc::new(detectors::network::IpAddressDetector::new(Arc::clone(
            validators,
        ))),
    ]
}

/// The default suite plus the built-in secrets scanner, as the scan
/// coordinator assembles it
pub fn full_detector_suite(validators: &Arc<ValidatorRegistry>) -> Vec<Arc<dyn Detector>> {
    let mut detectors = default_detectors(validators);
    detectors.push(Arc::new(SecretsDetector::builtin(Arc::clone(validators))));
    detectors
}
