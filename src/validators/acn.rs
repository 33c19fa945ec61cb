/// Australian Company Number validator
///
/// 9 digits; weights [8,7,6,5,4,3,2,1] over the first eight, complement
/// check digit in position nine.
use crate::core::{PIType, ValidationOutcome, Validator};
use crate::utils::checksum::validate_acn;

pub struct AcnValidator;

impl AcnValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AcnValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for AcnValidator {
    fn pi_type(&self) -> PIType {
        PIType::Acn
    }

    fn validate(&self, value: &str) -> ValidationOutcome {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != 9 {
            return Err(format!("ACN must be 9 digits, got {}", digits.len()));
        }

        if validate_acn(&digits) {
            Ok(())
        } else {
            Err("ACN check digit mismatch".to_string())
        }
    }

    /// Canonical form: "XXX XXX XXX"
    fn normalize(&self, value: &str) -> String {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != 9 {
            return digits;
        }

        format!("{} {} {}", &digits[0..3], &digits[3..6], &digits[6..9])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_acn() {
        let validator = AcnValidator::new();
        assert!(validator.validate("000000019").is_ok());
        assert!(validator.validate("010 499 966").is_ok());
    }

    #[test]
    fn test_invalid_acn() {
        let validator = AcnValidator::new();
        assert!(validator.validate("000000018").is_err());
        assert!(validator.validate("1234").is_err());
    }

    #[test]
    fn test_normalize_round_trip() {
        let validator = AcnValidator::new();
        let normalized = validator.normalize("000000019");
        assert_eq!(normalized, "000 000 019");
        assert!(validator.validate(&normalized).is_ok());
    }
}
