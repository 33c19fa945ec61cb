/// PI masking for terminal and report display
///
/// The JSON artefact carries raw matches for compliance review; every
/// human-facing surface (terminal, HTML, CSV) masks through these helpers.

/// Mask a PI value for display.
///
/// Shows the first 3 and last 2 characters, masks the middle.
/// Examples:
/// - "123456782" → "123****82"
/// - "33051775556" → "330******56"
pub fn mask_value(value: &str) -> String {
    let len = value.chars().count();

    if len <= 5 {
        return "*".repeat(len);
    }

    let show_start = 3.min(len / 3);
    let show_end = 2.min(len / 4);
    let mask_len = len - show_start - show_end;

    let chars: Vec<char> = value.chars().collect();
    format!(
        "{}{}{}",
        chars[..show_start].iter().collect::<String>(),
        "*".repeat(mask_len),
        chars[len - show_end..].iter().collect::<String>()
    )
}

/// Mask a credit card number (show last 4 digits only)
///
/// Examples:
/// - "4532015112830366" → "************0366"
pub fn mask_credit_card(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len < 13 {
        return "*".repeat(len);
    }

    format!("{}{}", "*".repeat(len - 4), &digits[len - 4..])
}

/// Mask an email address (show first char + domain)
///
/// Examples:
/// - "jane.citizen@example.com.au" → "j***********@example.com.au"
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let local = &email[..at_pos];
        let domain = &email[at_pos..];

        if local.is_empty() {
            return email.to_string();
        }

        let show_chars = 1.min(local.len());
        let mask_len = local.len() - show_chars;

        format!("{}{}{}", &local[..show_chars], "*".repeat(mask_len), domain)
    } else {
        "*".repeat(email.len())
    }
}

/// Mask a phone number (show prefix + last 3)
///
/// Examples:
/// - "+61412345678" → "+61*******678"
/// - "0412345678" → "04*****678"
pub fn mask_phone(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let len = digits.len();

    if len < 6 {
        return "*".repeat(len);
    }

    let show_start = if digits.starts_with('+') { 3 } else { 2 };
    let show_end = 3;
    let mask_len = len - show_start - show_end;

    format!(
        "{}{}{}",
        &digits[..show_start],
        "*".repeat(mask_len),
        &digits[len - show_end..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_value() {
        assert_eq!(mask_value("123456782"), "123****82");
        assert_eq!(mask_value("ABC"), "***");
        assert_eq!(mask_value("ABCDEFGHIJ"), "ABC*****IJ");
    }

    #[test]
    fn test_mask_credit_card() {
        assert_eq!(mask_credit_card("4532015112830366"), "************0366");
        assert_eq!(mask_credit_card("4532 0151 1283 0366"), "************0366");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("john.doe@example.com"), "j*******@example.com");
        assert_eq!(mask_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("+61412345678"), "+61******678");
        assert_eq!(mask_phone("0412345678"), "04*****678");
    }
}
