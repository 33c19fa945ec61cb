pub mod filter;
/// File discovery: tree walking, filtering, binary detection
pub mod walker;

pub use filter::{is_binary_chunk, is_binary_file, is_hidden};
pub use walker::{DiscoveryError, Walker};
