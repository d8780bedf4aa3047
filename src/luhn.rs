//! Luhn (mod 10) check digit.

use crate::ParseError;

/// Computes the Luhn check digit for a string of ASCII digits.
///
/// Digits are weighted 2, 1, 2, 1, ... from the left, doubled values above
/// nine have their digits summed, and the check digit is whatever brings the
/// total up to the next multiple of ten. For a personnummer the input is the
/// nine digits `YYMMDDNNN`.
///
/// # Errors
/// Returns `ParseError::InvalidFormat` for an empty string or any non-digit.
pub fn luhn(digits: &str) -> Result<u8, ParseError> {
    if digits.is_empty() {
        return Err(ParseError::InvalidFormat(
            "checksum input is empty".to_owned(),
        ));
    }

    let mut sum = 0u32;
    for (i, byte) in digits.bytes().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(ParseError::InvalidFormat(format!(
                "checksum input contains a non-digit at position {i}"
            )));
        }
        let mut value = u32::from(byte - b'0');
        if i % 2 == 0 {
            value *= 2;
            if value > 9 {
                value -= 9;
            }
        }
        sum += value;
    }

    // sum % 10 is below 10, the cast cannot truncate
    Ok(((10 - sum % 10) % 10) as u8)
}
