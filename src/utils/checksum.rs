//! Checksum validation for Australian regulatory identifiers
//!
//! Algorithms covered:
//!
//! - TFN weighted modulo-11
//! - ABN modulo-89 (leading digit minus one)
//! - ACN weighted check digit
//! - Medicare modulo-10 over the first eight digits
//! - BSB structural check (state digit)
//! - Luhn (credit cards)

/// Digits of a string, separators stripped
fn digits_of(value: &str) -> Vec<u32> {
    value
        .chars()
        .filter(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect()
}

/// Validates an Australian Tax File Number.
///
/// After stripping spaces and dashes the value must be exactly 9 digits.
/// Each digit is multiplied by the weights `[1,4,3,7,5,8,6,9,10]`; the
/// weighted sum must be divisible by 11.
///
/// # Examples
/// ```
/// use pi_sentinel::utils::checksum::validate_tfn;
///
/// assert!(validate_tfn("123456782"));   // valid checksum
/// assert!(!validate_tfn("123456789"));  // invalid checksum
/// ```
pub fn validate_tfn(tfn: &str) -> bool {
    let digits = digits_of(tfn);

    if digits.len() != 9 {
        return false;
    }

    const WEIGHTS: [u32; 9] = [1, 4, 3, 7, 5, 8, 6, 9, 10];

    let sum: u32 = digits
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(&digit, &weight)| digit * weight)
        .sum();

    sum % 11 == 0
}

/// Validates an Australian Business Number.
///
/// The value must be exactly 11 digits. One is subtracted from the first
/// digit, then the weights `[10,1,3,5,7,9,11,13,15,17,19]` are applied;
/// the weighted sum must be divisible by 89.
///
/// # Examples
/// ```
/// use pi_sentinel::utils::checksum::validate_abn;
///
/// assert!(validate_abn("33051775556"));  // Telstra
/// assert!(!validate_abn("33051775557"));
/// ```
pub fn validate_abn(abn: &str) -> bool {
    let digits = digits_of(abn);

    if digits.len() != 11 {
        return false;
    }

    const WEIGHTS: [i64; 11] = [10, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19];

    let sum: i64 = digits
        .iter()
        .enumerate()
        .map(|(i, &digit)| {
            let d = if i == 0 { digit as i64 - 1 } else { digit as i64 };
            d * WEIGHTS[i]
        })
        .sum();

    sum % 89 == 0
}

/// Validates an Australian Company Number.
///
/// The value must be exactly 9 digits. The weights `[8,7,6,5,4,3,2,1]`
/// are applied to the first eight digits; the complement
/// `(10 - (sum mod 10)) mod 10` must equal the ninth digit.
///
/// # Examples
/// ```
/// use pi_sentinel::utils::checksum::validate_acn;
///
/// assert!(validate_acn("000000019"));
/// assert!(!validate_acn("000000018"));
/// ```
pub fn validate_acn(acn: &str) -> bool {
    let digits = digits_of(acn);

    if digits.len() != 9 {
        return false;
    }

    const WEIGHTS: [u32; 8] = [8, 7, 6, 5, 4, 3, 2, 1];

    let sum: u32 = digits[..8]
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(&digit, &weight)| digit * weight)
        .sum();

    let check = (10 - (sum % 10)) % 10;
    check == digits[8]
}

/// Validates an Australian Medicare number.
///
/// 10 or 11 digits after stripping separators; the first digit must be in
/// 2..=6. The weights `[1,3,7,9,1,3,7,9]` are applied to digits 1..8 and
/// the sum modulo 10 must equal digit 9. Digit 10 is the Individual
/// Reference Number and digit 11 (when present) the card issue number;
/// neither participates in the checksum.
///
/// # Examples
/// ```
/// use pi_sentinel::utils::checksum::validate_medicare;
///
/// assert!(validate_medicare("2123456701"));
/// assert!(!validate_medicare("9123456701")); // first digit out of range
/// ```
pub fn validate_medicare(medicare: &str) -> bool {
    let digits = digits_of(medicare);

    if digits.len() != 10 && digits.len() != 11 {
        return false;
    }

    if !(2..=6).contains(&digits[0]) {
        return false;
    }

    const WEIGHTS: [u32; 8] = [1, 3, 7, 9, 1, 3, 7, 9];

    let sum: u32 = digits[..8]
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(&digit, &weight)| digit * weight)
        .sum();

    sum % 10 == digits[8]
}

/// Validates a Bank-State-Branch code.
///
/// Exactly 6 digits after stripping the optional dash; the third digit
/// (the state digit) must be in 2..=7.
///
/// # Examples
/// ```
/// use pi_sentinel::utils::checksum::validate_bsb;
///
/// assert!(validate_bsb("062-000"));  // state digit 2
/// assert!(!validate_bsb("068-000")); // state digit 8
/// ```
pub fn validate_bsb(bsb: &str) -> bool {
    let digits = digits_of(bsb);

    if digits.len() != 6 {
        return false;
    }

    (2..=7).contains(&digits[2])
}

/// Validates a credit card number with the Luhn algorithm (modulo-10).
///
/// Starting from the rightmost digit, every second digit is doubled; if
/// the result exceeds 9, 9 is subtracted. The total must be divisible
/// by 10. Card numbers are 13 to 19 digits.
///
/// # Examples
/// ```
/// use pi_sentinel::utils::checksum::validate_luhn;
///
/// assert!(validate_luhn("4532015112830366"));  // valid Visa test number
/// assert!(!validate_luhn("1234567890123456"));
/// ```
pub fn validate_luhn(number: &str) -> bool {
    let digits = digits_of(number);

    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(index, &digit)| {
            if index % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tfn_valid() {
        assert!(validate_tfn("123456782"));
        assert!(validate_tfn("123 456 782"));
        assert!(validate_tfn("123-456-782"));
    }

    #[test]
    fn test_tfn_invalid_checksum() {
        assert!(!validate_tfn("123456789"));
        assert!(!validate_tfn("987654321"));
    }

    #[test]
    fn test_tfn_wrong_length() {
        assert!(!validate_tfn("12345678"));
        assert!(!validate_tfn("1234567890"));
        assert!(!validate_tfn(""));
    }

    #[test]
    fn test_tfn_all_zeros_passes_checksum() {
        // Algebraically valid; synthetic-filler suppression is the
        // context validator's job, not the checksum's.
        assert!(validate_tfn("000000000"));
    }

    #[test]
    fn test_abn_valid_known_entities() {
        assert!(validate_abn("33051775556")); // Telstra
        assert!(validate_abn("51824753556")); // ATO
        assert!(validate_abn("53 004 085 616")); // with separators
    }

    #[test]
    fn test_abn_invalid() {
        assert!(!validate_abn("33051775557"));
        assert!(!validate_abn("11111111111"));
        assert!(!validate_abn("3305177555")); // 10 digits
    }

    #[test]
    fn test_acn_valid() {
        assert!(validate_acn("000000019"));
        assert!(validate_acn("004085616"));
        assert!(validate_acn("010 499 966"));
    }

    #[test]
    fn test_acn_invalid() {
        assert!(!validate_acn("000000018"));
        assert!(!validate_acn("00000001")); // 8 digits
    }

    #[test]
    fn test_medicare_valid() {
        assert!(validate_medicare("2123456701"));
        assert!(validate_medicare("2123 45670 1"));
        assert!(validate_medicare("21234567011")); // with issue digit
    }

    #[test]
    fn test_medicare_first_digit_range() {
        assert!(!validate_medicare("1123456701"));
        assert!(!validate_medicare("9123456701"));
    }

    #[test]
    fn test_medicare_invalid_checksum() {
        assert!(!validate_medicare("2123456791"));
    }

    #[test]
    fn test_medicare_wrong_length() {
        assert!(!validate_medicare("212345670"));
        assert!(!validate_medicare("212345670123"));
    }

    #[test]
    fn test_bsb_state_digit() {
        assert!(validate_bsb("062-000")); // NSW
        assert!(validate_bsb("033000")); // VIC
        assert!(validate_bsb("735-000"));
        assert!(!validate_bsb("068-000")); // 8 not a state digit
        assert!(!validate_bsb("091-000"));
    }

    #[test]
    fn test_bsb_length() {
        assert!(!validate_bsb("06200"));
        assert!(!validate_bsb("0620000"));
    }

    #[test]
    fn test_luhn() {
        assert!(validate_luhn("4532015112830366"));
        assert!(validate_luhn("5425233430109903"));
        assert!(validate_luhn("378282246310005"));
        assert!(!validate_luhn("4532015112830367"));
        assert!(!validate_luhn("123456"));
    }
}
