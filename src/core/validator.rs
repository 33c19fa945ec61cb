/// Validator trait and registry for Australian identifier checksums
use crate::core::types::PIType;
use std::collections::HashMap;

/// Outcome of a single validation call. A failed checksum is a data
/// outcome, not an error; the reason travels with the finding.
pub type ValidationOutcome = Result<(), String>;

/// Algorithmic validator for one identifier type
pub trait Validator: Send + Sync {
    /// The PI type this validator covers
    fn pi_type(&self) -> PIType;

    /// Checksum / structural validation of a raw match
    fn validate(&self, value: &str) -> ValidationOutcome;

    /// Canonical presentation form (separators normalised)
    fn normalize(&self, value: &str) -> String;
}

/// Immutable map of `PIType -> Validator`.
///
/// A missing entry means no validation is available for that type (email,
/// phone, name, ...); the finding stays unvalidated with no error.
pub struct ValidatorRegistry {
    validators: HashMap<PIType, Box<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    pub fn register(&mut self, validator: Box<dyn Validator>) {
        self.validators.insert(validator.pi_type(), validator);
    }

    /// Look up the validator for a type, if one is registered
    pub fn get(&self, pi_type: &PIType) -> Option<&dyn Validator> {
        self.validators.get(pi_type).map(|v| v.as_ref())
    }

    /// Validate a value if a validator exists for the type.
    /// Returns `None` when the type has no registered validator.
    pub fn validate(&self, pi_type: &PIType, value: &str) -> Option<ValidationOutcome> {
        self.get(pi_type).map(|v| v.validate(value))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysValid;

    impl Validator for AlwaysValid {
        fn pi_type(&self) -> PIType {
            PIType::Tfn
        }

        fn validate(&self, _value: &str) -> ValidationOutcome {
            Ok(())
        }

        fn normalize(&self, value: &str) -> String {
            value.to_string()
        }
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = ValidatorRegistry::new();
        registry.register(Box::new(AlwaysValid));

        assert!(registry.get(&PIType::Tfn).is_some());
        assert!(registry.get(&PIType::Email).is_none());
        assert_eq!(registry.validate(&PIType::Tfn, "x"), Some(Ok(())));
        assert_eq!(registry.validate(&PIType::Email, "x"), None);
    }
}
