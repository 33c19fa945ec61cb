/// Bank-State-Branch code validator
///
/// 6 digits; the third digit (state) must be in 2-7. No checksum exists
/// for BSBs; validation is purely structural.
use crate::core::{PIType, ValidationOutcome, Validator};
use crate::utils::checksum::validate_bsb;

pub struct BsbValidator;

impl BsbValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BsbValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for BsbValidator {
    fn pi_type(&self) -> PIType {
        PIType::Bsb
    }

    fn validate(&self, value: &str) -> ValidationOutcome {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != 6 {
            return Err(format!("BSB must be 6 digits, got {}", digits.len()));
        }

        if validate_bsb(&digits) {
            Ok(())
        } else {
            Err("BSB state digit out of range 2-7".to_string())
        }
    }

    /// Canonical form: "XXX-XXX"
    fn normalize(&self, value: &str) -> String {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != 6 {
            return digits;
        }

        format!("{}-{}", &digits[0..3], &digits[3..6])
    }
}
