//! Splits the accepted textual shapes into raw numeric segments and infers
//! the century for the short forms.

use crate::ParseError;
use crate::consts::{
    CENTENARIAN_AGE, LONG_LEN, LONG_SEPARATED_LEN, LONG_SEPARATOR_INDEX, MAX_YEAR, SHORT_LEN,
    SHORT_SEPARATED_LEN, SHORT_SEPARATOR_INDEX,
};
use crate::types::Separator;

/// Years per century, as used by the two digit year arithmetic
const YEARS_PER_CENTURY: i32 = 100;

/// Segments of the input before any semantic validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawParts {
    pub century:   Option<u8>,
    pub year:      u8,
    pub month:     u8,
    pub day:       u8,
    pub separator: Option<Separator>,
    pub serial:    u16,
    pub check:     u8,
}

/// Splits one of `YYMMDDNNNC`, `YYMMDD±NNNC`, `CCYYMMDDNNNC` or
/// `CCYYMMDD±NNNC`. No trimming: whitespace anywhere is an error.
pub(crate) fn split(input: &str) -> Result<RawParts, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if !input.is_ascii() {
        return Err(ParseError::InvalidFormat(format!(
            "{input:?} contains non-ASCII characters"
        )));
    }

    let separator_index = match input.len() {
        SHORT_LEN | LONG_LEN => None,
        SHORT_SEPARATED_LEN => Some(SHORT_SEPARATOR_INDEX),
        LONG_SEPARATED_LEN => Some(LONG_SEPARATOR_INDEX),
        n => {
            return Err(ParseError::InvalidFormat(format!(
                "expected {SHORT_LEN} to {LONG_SEPARATED_LEN} characters, found {n}"
            )));
        },
    };

    let mut digits = Vec::with_capacity(LONG_LEN);
    let mut separator = None;
    for (i, byte) in input.bytes().enumerate() {
        let c = char::from(byte);
        if separator_index == Some(i) {
            separator = Some(Separator::from_char(c).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "expected '-' or '+' at position {i}, found {c:?}"
                ))
            })?);
        } else if byte.is_ascii_digit() {
            digits.push(byte - b'0');
        } else {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected character {c:?} at position {i}"
            )));
        }
    }

    let (century, rest) = match digits.split_at_checked(digits.len() - SHORT_LEN) {
        Some(([], rest)) => (None, rest),
        Some(([c1, c2], rest)) => (Some(*c1 * 10 + *c2), rest),
        _ => {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected digit count {}",
                digits.len()
            )));
        },
    };

    match *rest {
        [y1, y2, m1, m2, d1, d2, n1, n2, n3, check] => Ok(RawParts {
            century,
            year: y1 * 10 + y2,
            month: m1 * 10 + m2,
            day: d1 * 10 + d2,
            separator,
            serial: u16::from(n1) * 100 + u16::from(n2) * 10 + u16::from(n3),
            check,
        }),
        _ => Err(ParseError::InvalidFormat(format!(
            "unexpected digit count {}",
            digits.len()
        ))),
    }
}

/// Resolves the four digit birth year and the separator as of
/// `current_year`.
///
/// Short forms take the latest year ending in `YY` that is not after
/// `current_year`; a `+` moves the reference point a century back. The
/// separator is `+` exactly when the birth year lies a century or more
/// before `current_year`, which keeps the short form unambiguous.
pub(crate) fn resolve_year(
    parts: &RawParts,
    current_year: i32,
) -> Result<(u16, Separator), ParseError> {
    let year = i32::from(parts.year);
    let full_year = match parts.century {
        Some(century) => i32::from(century) * YEARS_PER_CENTURY + year,
        None => {
            let base = if parts.separator == Some(Separator::Plus) {
                current_year - CENTENARIAN_AGE
            } else {
                current_year
            };
            base - (base - year).rem_euclid(YEARS_PER_CENTURY)
        },
    };

    let separator = if current_year - full_year >= CENTENARIAN_AGE {
        Separator::Plus
    } else {
        Separator::Minus
    };

    // only the long separated form can carry a '+' that contradicts the century
    if parts.separator == Some(Separator::Plus) && separator != Separator::Plus {
        return Err(ParseError::InvalidFormat(format!(
            "'+' separator used for birth year {full_year}, less than a century before {current_year}"
        )));
    }

    let full_year = u16::try_from(full_year)
        .ok()
        .filter(|year| *year <= MAX_YEAR)
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!(
                "birth year {full_year} resolved against clock year {current_year} is outside 0-{MAX_YEAR}"
            ))
        })?;

    Ok((full_year, separator))
}
