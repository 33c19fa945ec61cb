pub mod abn;
pub mod acn;
pub mod bsb;
pub mod medicare;
/// Algorithmic validators for Australian regulatory identifiers
pub mod tfn;

pub use abn::AbnValidator;
pub use acn::AcnValidator;
pub use bsb::BsbValidator;
pub use medicare::MedicareValidator;
pub use tfn::TfnValidator;
