pub mod au; // Australian regulatory identifiers
pub mod financial; // Credit cards
pub mod network; // IP addresses
pub mod personal; // Email, names, street addresses
pub mod secrets; // Rule-table secrets scanner

// Re-export common detector types
pub use crate::core::Detector;

use crate::core::{Finding, PIType, RiskLevel, ValidatorRegistry};
use chrono::Utc;

/// Maximum bytes of surrounding file content captured with each finding
pub(crate) const CONTEXT_BYTES: usize = 50;

/// Translate a byte offset into a 1-based (line, column) pair by scanning
/// for line feeds in the preceding text.
pub(crate) fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let prefix = &text[..offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let line_start = prefix.rfind('\n').map(|p| p + 1).unwrap_or(0);
    (line, offset - line_start + 1)
}

/// Extract up to `CONTEXT_BYTES` of text either side of a match, clamped
/// to character boundaries.
pub(crate) fn context_window(text: &str, start: usize, end: usize) -> (String, String) {
    let mut before_start = start.saturating_sub(CONTEXT_BYTES);
    while !text.is_char_boundary(before_start) {
        before_start += 1;
    }

    let mut after_end = (end + CONTEXT_BYTES).min(text.len());
    while !text.is_char_boundary(after_end) {
        after_end -= 1;
    }

    (
        text[before_start..start].to_string(),
        text[end..after_end].to_string(),
    )
}

/// Preliminary risk level derived from the type weight; the risk scorer
/// refines it after context validation.
pub(crate) fn preliminary_risk(pi_type: &PIType) -> RiskLevel {
    let weight = pi_type.base_weight();
    if weight >= 90 {
        RiskLevel::High
    } else if weight >= 60 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Assemble a finding for a match at `start..end`, running the registered
/// validator for the type when one exists. Confidence: 0.95 on validation
/// success, 0.5 on failure, 0.8 when no validator is registered.
pub(crate) fn build_finding(
    text: &str,
    start: usize,
    end: usize,
    pi_type: PIType,
    detector_name: &str,
    file_name: &str,
    validators: &ValidatorRegistry,
) -> Finding {
    let matched = text[start..end].to_string();
    let (line, column) = line_column(text, start);
    let (context_before, context_after) = context_window(text, start, end);

    let (validated, validation_error, confidence) = match validators.validate(&pi_type, &matched) {
        Some(Ok(())) => (true, String::new(), 0.95),
        Some(Err(reason)) => (false, reason, 0.5),
        None => (false, String::new(), 0.8),
    };

    Finding {
        risk_level: preliminary_risk(&pi_type),
        pi_type,
        matched,
        file: file_name.to_string(),
        line,
        column,
        context_before,
        context_after,
        confidence,
        context_modifier: 1.0,
        validated,
        validation_error,
        detected_at: Utc::now(),
        detector_name: detector_name.to_string(),
        start_byte: start,
        end_byte: end,
    }
}
