pub mod csv;
pub mod html;
pub mod sarif;
/// Output renderers for scan artefacts
pub mod terminal;

pub use csv::CsvReporter;
pub use html::HtmlReporter;
pub use sarif::SarifReporter;
pub use terminal::TerminalReporter;

use crate::core::{Finding, PIType};
use crate::utils::{mask_credit_card, mask_email, mask_phone, mask_value};

/// Mask a finding's matched text for human-facing output. The JSON
/// artefact keeps raw matches; every rendered surface goes through here.
pub fn mask_finding(finding: &Finding) -> String {
    match finding.pi_type {
        PIType::Email => mask_email(&finding.matched),
        PIType::CreditCard => mask_credit_card(&finding.matched),
        PIType::Phone => mask_phone(&finding.matched),
        _ => mask_value(&finding.matched),
    }
}
