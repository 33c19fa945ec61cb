/// Universal financial detectors
pub mod creditcard;

pub use creditcard::CreditCardDetector;
