/// Detector trait implemented by every pattern and secrets detector
use crate::core::types::Finding;

/// Capability set for a single detector.
///
/// A detector is responsible for:
/// 1. Pattern matching over the raw file text
/// 2. Pre-filtering obvious non-matches before validation
/// 3. Producing `Finding`s with positions, context, and preliminary risk
///
/// Detectors receive the file's repo-relative name for reporting; the
/// pipeline rewrites the `file` field to the job's full path afterwards.
/// Implementations must be `Send + Sync`: compiled patterns are shared
/// across workers without locking.
pub trait Detector: Send + Sync {
    /// Stable detector name, e.g. "tfn", "au_phone", "secrets"
    fn name(&self) -> &str;

    /// Detect PI in the given text. Matches from a single detector never
    /// overlap in byte range; cross-detector overlap is resolved by the
    /// pipeline.
    fn detect(&self, text: &str, file_name: &str) -> Vec<Finding>;

    /// Optional human-readable description
    fn description(&self) -> Option<String> {
        None
    }
}
