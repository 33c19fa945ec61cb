/// Network identifier detectors
pub mod ip;

pub use ip::IpAddressDetector;
