/// Australian Business Number validator
///
/// 11 digits; subtract one from the first digit, apply weights
/// [10,1,3,5,7,9,11,13,15,17,19], sum must be divisible by 89.
use crate::core::{PIType, ValidationOutcome, Validator};
use crate::utils::checksum::validate_abn;

pub struct AbnValidator;

impl AbnValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AbnValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for AbnValidator {
    fn pi_type(&self) -> PIType {
        PIType::Abn
    }

    fn validate(&self, value: &str) -> ValidationOutcome {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != 11 {
            return Err(format!("ABN must be 11 digits, got {}", digits.len()));
        }

        if validate_abn(&digits) {
            Ok(())
        } else {
            Err("ABN modulo-89 checksum failed".to_string())
        }
    }

    /// Canonical form: "XX XXX XXX XXX"
    fn normalize(&self, value: &str) -> String {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.len() != 11 {
            return digits;
        }

        format!(
            "{} {} {} {}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..11]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_abn() {
        let validator = AbnValidator::new();
        assert!(validator.validate("33051775556").is_ok()); // Telstra
        assert!(validator.validate("51 824 753 556").is_ok()); // ATO
    }

    #[test]
    fn test_invalid_abn() {
        let validator = AbnValidator::new();
        assert!(validator.validate("33051775557").is_err());
        assert!(validator.validate("330517755").is_err());
    }

    #[test]
    fn test_normalize_grouping() {
        let validator = AbnValidator::new();
        assert_eq!(validator.normalize("33051775556"), "33 051 775 556");
    }

    #[test]
    fn test_normalize_round_trip() {
        let validator = AbnValidator::new();
        let normalized = validator.normalize("33051775556");
        assert!(validator.validate(&normalized).is_ok());
    }
}
