//! Phone number utilities
//!
//! Normalization follows a fixed North American default: bare 10-digit
//! numbers are assumed to be `+1` numbers. This is not a general E.164
//! parser; anything else keeps its own country code.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum length of a canonical destination, including the leading `+`
pub const MAX_DESTINATION_LENGTH: usize = 16;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("E.164 pattern is valid"));

/// Raw input that cannot be turned into a destination at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneFormatError {
    #[error("Phone number is required")]
    Empty,
}

/// Normalize raw user input into a canonical destination
///
/// - strips every non-digit character
/// - 10 digits: prefixed with `+1`
/// - 11 digits starting with `1`: prefixed with `+`
/// - otherwise the raw input is kept verbatim when it starts with `+`,
///   else the digits are prefixed with `+`
///
/// The result is not guaranteed to be valid; run [`is_valid_destination`]
/// on it before use.
pub fn normalize_phone_number(raw: &str) -> Result<String, PhoneFormatError> {
    if raw.trim().is_empty() {
        return Err(PhoneFormatError::Empty);
    }

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let normalized = match digits.len() {
        10 => format!("+1{}", digits),
        11 if digits.starts_with('1') => format!("+{}", digits),
        _ if raw.starts_with('+') => raw.to_string(),
        _ => format!("+{}", digits),
    };

    Ok(normalized)
}

/// Check if a destination is in canonical E.164 shape
pub fn is_valid_destination(destination: &str) -> bool {
    destination.len() <= MAX_DESTINATION_LENGTH && E164_REGEX.is_match(destination)
}

/// Mask a phone number for logging, keeping only the last 4 digits
///
/// ```
/// use sg_shared::phone::mask_phone_number;
/// assert_eq!(mask_phone_number("+14155552671"), "+*******2671");
/// ```
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible: String = chars[chars.len() - 4..].iter().collect();
    if chars[0] == '+' {
        format!("+{}{}", "*".repeat(chars.len() - 5), visible)
    } else {
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

/// Mask an email address for logging (e.g. `j***@example.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
