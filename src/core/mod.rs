pub mod cancel;
pub mod detector;
/// Core types and traits for PI-Sentinel
pub mod types;
pub mod validator;

pub use cancel::{CancelToken, CANCELLED};
pub use detector::Detector;
pub use types::*;
pub use validator::{ValidationOutcome, Validator, ValidatorRegistry};
