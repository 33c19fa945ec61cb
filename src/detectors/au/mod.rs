pub mod abn;
pub mod acn;
pub mod bsb;
pub mod medicare;
pub mod phone;
/// Detectors for Australian regulatory identifiers
pub mod tfn;

pub use abn::AbnDetector;
pub use acn::AcnDetector;
pub use bsb::BsbDetector;
pub use medicare::MedicareDetector;
pub use phone::AuPhoneDetector;
pub use tfn::TfnDetector;
