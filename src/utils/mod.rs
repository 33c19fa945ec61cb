pub mod checksum;
pub mod entropy;
pub mod masking;

pub use checksum::{
    validate_abn, validate_acn, validate_bsb, validate_luhn, validate_medicare, validate_tfn,
};
pub use entropy::{is_high_entropy, shannon_entropy};
pub use masking::{mask_credit_card, mask_email, mask_phone, mask_value};
