use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, COORDINATION_DAY_OFFSET, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_COORDINATION_DAY, MAX_DAY, MAX_MONTH,
    MIN_COORDINATION_DAY, MIN_DAY, MINUS_SEPARATOR, PLUS_SEPARATOR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU8, NonZeroU16};

/// Largest serial that fits in three digits
const MAX_SERIAL: u16 = 999;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0.get())
    }
}

/// The day segment as written in the number.
///
/// Coordination numbers store the day of birth plus 60, so the encoded
/// value is either `1..=31` or `61..=91`. The encoded value is kept for
/// formatting; [`BirthDay::real`] gives the calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDay(NonZeroU8);

impl BirthDay {
    /// Validates an encoded day against the birth year and month.
    ///
    /// # Errors
    /// - `ParseError::CoordinationNumberNotAllowed` for a coordination day
    ///   when `allow_coordination` is false.
    /// - `ParseError::InvalidDay` when the day is outside both ranges or the
    ///   real day does not exist in that month.
    pub fn new(
        encoded: u8,
        year: u16,
        month: Month,
        allow_coordination: bool,
    ) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            year,
            month: month.get(),
            day: encoded,
        };

        let coordination = is_coordination_day(encoded);
        if coordination && !allow_coordination {
            return Err(ParseError::CoordinationNumberNotAllowed);
        }
        if !coordination && !(MIN_DAY..=MAX_DAY).contains(&encoded) {
            return Err(invalid);
        }

        let real = real_day(encoded);
        if real > days_in_month(year, month.get()) {
            return Err(invalid);
        }

        NonZeroU8::new(encoded).map(Self).ok_or(invalid)
    }

    /// The day as it appears in the number
    #[inline]
    pub const fn encoded(self) -> u8 {
        self.0.get()
    }

    /// The calendar day of birth
    #[inline]
    pub const fn real(self) -> u8 {
        real_day(self.0.get())
    }

    #[inline]
    pub const fn is_coordination(self) -> bool {
        is_coordination_day(self.0.get())
    }
}

impl fmt::Display for BirthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0.get())
    }
}

/// The three digit birth serial ("födelsenummer"), never `000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Serial(NonZeroU16);

impl Serial {
    /// # Errors
    /// Returns `ParseError::ZeroSerial` for 0 and `ParseError::InvalidFormat`
    /// for values wider than three digits.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::ZeroSerial)?;
        if value > MAX_SERIAL {
            return Err(ParseError::InvalidFormat(format!(
                "serial {value} has more than three digits"
            )));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// The middle digit, which carries the sex of the holder
    #[inline]
    pub const fn sex_digit(self) -> u8 {
        ((self.0.get() / 10) % 10) as u8
    }
}

impl TryFrom<u16> for Serial {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Serial> for u16 {
    fn from(serial: Serial) -> Self {
        serial.0.get()
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0.get())
    }
}

/// Separator between the date and the serial in the short forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Separator {
    /// Holder is younger than a hundred years
    #[display(fmt = "-")]
    Minus,
    /// Holder has turned a hundred
    #[display(fmt = "+")]
    Plus,
}

impl Separator {
    pub const fn as_char(self) -> char {
        match self {
            Self::Minus => MINUS_SEPARATOR,
            Self::Plus => PLUS_SEPARATOR,
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            MINUS_SEPARATOR => Some(Self::Minus),
            PLUS_SEPARATOR => Some(Self::Plus),
            _ => None,
        }
    }
}

// Helper functions

pub const fn is_coordination_day(encoded: u8) -> bool {
    encoded >= MIN_COORDINATION_DAY && encoded <= MAX_COORDINATION_DAY
}

pub const fn real_day(encoded: u8) -> u8 {
    if is_coordination_day(encoded) {
        encoded - COORDINATION_DAY_OFFSET
    } else {
        encoded
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
