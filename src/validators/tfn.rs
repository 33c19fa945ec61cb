/// Tax File Number validator
///
/// 9 digits after stripping separators, weighted modulo-11 checksum with
/// weights [1,4,3,7,5,8,6,9,10]. The all-zeros value satisfies the
/// checksum algebraically and is accepted here; synthetic-filler
/// suppression happens in context validation.
use crate::core::{PIType, ValidationOutcome, Validator};
use crate::utils::checksum::validate_tfn;

pub struct TfnValidator;

impl TfnValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TfnValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for TfnValidator {
    fn pi_type(&self) -> PIType {
        PIType::Tfn
    }

    fn validate(&self, value: &str) -> ValidationOutcome {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != 9 {
            return Err(format!("TFN must be 9 digits, got {}", digits.len()));
        }

        if validate_tfn(&digits) {
            Ok(())
        } else {
            Err("TFN checksum failed".to_string())
        }
    }

    fn normalize(&self, value: &str) -> String {
        value.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}
