/// Medicare number validator
///
/// 10 or 11 digits; first digit 2-6; weighted modulo-10 checksum over
/// digits 1..8 against digit 9. Digit 10 is the Individual Reference
/// Number and digit 11 the card issue number; both are kept in the
/// reported value but excluded from the checksum.
use crate::core::{PIType, ValidationOutcome, Validator};
use crate::utils::checksum::validate_medicare;

pub struct MedicareValidator;

impl MedicareValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MedicareValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for MedicareValidator {
    fn pi_type(&self) -> PIType {
        PIType::Medicare
    }

    fn validate(&self, value: &str) -> ValidationOutcome {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != 10 && digits.len() != 11 {
            return Err(format!(
                "Medicare number must be 10 or 11 digits, got {}",
                digits.len()
            ));
        }

        let first = digits.chars().next().and_then(|c| c.to_digit(10));
        if !matches!(first, Some(2..=6)) {
            return Err("Medicare number must start with 2-6".to_string());
        }

        if validate_medicare(&digits) {
            Ok(())
        } else {
            Err("Medicare checksum failed".to_string())
        }
    }

    /// Canonical form: "XXXX XXXXX X" (card digits, check+IRN grouped)
    fn normalize(&self, value: &str) -> String {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() < 10 {
            return digits;
        }

        format!("{} {} {}", &digits[0..4], &digits[4..9], &digits[9..])
    }
}
