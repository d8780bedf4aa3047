mod consts;
mod field;
mod input;
mod luhn;
mod normalize;
mod options;
mod prelude;
mod types;

pub use consts::*;
pub use field::{Field, UnknownField};
pub use input::TypeError;
pub use luhn::luhn;
pub use options::{Clock, Diagnostic, Options};
pub use types::{BirthDay, Month, Separator, Serial};

use crate::input::Scalar;
use crate::prelude::*;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Years per century, used to split the birth year
const CENTURY: u16 = 100;

/// A validated Swedish personal identity number or coordination number.
///
/// Values only come out of the parser and never change afterwards. The
/// clock used while parsing is kept so that [`Personnummer::age`] answers
/// relative to the same "now" that chose the century. Equality and hashing
/// ignore that clock: two values are equal when their long separated forms
/// are.
#[derive(Debug, Clone, Copy)]
pub struct Personnummer {
    full_year: u16,
    month:     Month,
    day:       BirthDay,
    sep:       Separator,
    serial:    Serial,
    check:     u8,
    date:      NaiveDate,
    clock:     Clock,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid personnummer format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Invalid serial: 000 is never issued")]
    ZeroSerial,
    #[display(fmt = "Invalid check digit {found} (expected {expected})")]
    ChecksumMismatch { expected: u8, found: u8 },
    #[display(fmt = "Coordination numbers are not allowed")]
    CoordinationNumberNotAllowed,
    #[display(fmt = "Empty personnummer string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Either tier of failure from the loosely typed entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The caller passed something that cannot hold a number at all.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The value was a string or integer but not a valid personnummer.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Personnummer {
    /// Parses with default options.
    ///
    /// # Errors
    /// Returns `ParseError` describing the first check that failed.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with_options(input, &Options::default())
    }

    /// Parses any of `YYMMDDNNNC`, `YYMMDD-NNNC`, `YYMMDD+NNNC`,
    /// `CCYYMMDDNNNC` and `CCYYMMDD-NNNC`.
    ///
    /// # Errors
    /// Returns `ParseError` describing the first check that failed.
    pub fn parse_with_options(input: &str, options: &Options) -> Result<Self, ParseError> {
        let result = Self::build(input, options);
        if let Err(err) = &result {
            tracing::debug!(len = input.len(), error = %err, "rejected personnummer");
        }
        result
    }

    /// Parses the decimal rendering of `value`, e.g. `199001010173`.
    ///
    /// # Errors
    /// Returns `ParseError` describing the first check that failed.
    pub fn from_integer(value: u64, options: &Options) -> Result<Self, ParseError> {
        Self::parse_with_options(&value.to_string(), options)
    }

    /// Parses a loosely typed value such as a field of decoded JSON.
    ///
    /// # Errors
    /// - `Error::Type` for `null`, arrays and objects.
    /// - `Error::Parse` for every other invalid value, booleans included.
    pub fn from_value(value: &Value, options: &Options) -> Result<Self, Error> {
        match input::classify(value)? {
            Scalar::Text(text) => Ok(Self::parse_with_options(text, options)?),
            Scalar::Integer(number) => Ok(Self::from_integer(number, options)?),
            Scalar::Unsupported(kind) => Err(ParseError::InvalidFormat(format!(
                "{kind} is not a personnummer"
            ))
            .into()),
        }
    }

    /// Parses a loosely typed value with loosely typed options.
    ///
    /// Option diagnostics are returned next to the parsed value; they never
    /// fail the parse.
    ///
    /// # Errors
    /// Same as [`Personnummer::from_value`], plus `Error::Type` when
    /// `options` is neither an object nor `null`.
    pub fn from_json(value: &Value, options: &Value) -> Result<(Self, Vec<Diagnostic>), Error> {
        let (options, diagnostics) = Options::from_json(options)?;
        let parsed = Self::from_value(value, &options)?;
        Ok((parsed, diagnostics))
    }

    /// Returns whether `input` parses with default options.
    pub fn valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Returns whether `input` parses with `options`.
    pub fn valid_with_options(input: &str, options: &Options) -> bool {
        Self::parse_with_options(input, options).is_ok()
    }

    /// Returns whether a loosely typed value is a valid personnummer.
    ///
    /// # Errors
    /// Invalid numbers are `Ok(false)`; only the contract violation of
    /// [`Personnummer::from_value`] is an error.
    pub fn valid_value(value: &Value, options: &Options) -> Result<bool, TypeError> {
        match Self::from_value(value, options) {
            Ok(_) => Ok(true),
            Err(Error::Parse(_)) => Ok(false),
            Err(Error::Type(err)) => Err(err),
        }
    }

    fn build(input: &str, options: &Options) -> Result<Self, ParseError> {
        let parts = normalize::split(input)?;
        let now = options.clock.now();
        let (full_year, sep) = normalize::resolve_year(&parts, now.year())?;

        // structure
        let month = Month::new(parts.month)?;
        let day = BirthDay::new(
            parts.day,
            full_year,
            month,
            options.allow_coordination_number,
        )?;
        let serial = Serial::new(parts.serial)?;

        // checksum over YYMMDDNNN
        let expected = luhn(&format!("{:02}{month}{day}{serial}", parts.year))?;
        if expected != parts.check {
            return Err(ParseError::ChecksumMismatch {
                expected,
                found: parts.check,
            });
        }

        let date = NaiveDate::from_ymd_opt(
            i32::from(full_year),
            u32::from(month.get()),
            u32::from(day.real()),
        )
        .ok_or(ParseError::InvalidDay {
            year: full_year,
            month: month.get(),
            day: parts.day,
        })?;

        Ok(Self {
            full_year,
            month,
            day,
            sep,
            serial,
            check: parts.check,
            date,
            clock: options.clock,
        })
    }
}

impl Personnummer {
    /// `YYMMDD-NNNC` (or `+` from the hundredth birth year), or the
    /// separator-less `CCYYMMDDNNNC` when `long` is set.
    pub fn format(&self, long: bool) -> String {
        if long {
            format!(
                "{:04}{}{}{}{}",
                self.full_year, self.month, self.day, self.serial, self.check
            )
        } else {
            format!(
                "{:02}{}{}{}{}{}",
                self.full_year % CENTURY,
                self.month,
                self.day,
                self.sep,
                self.serial,
                self.check
            )
        }
    }

    /// `CCYYMMDD-NNNC`, the form every named field is sliced from
    pub fn format_separated_long(&self) -> String {
        format!(
            "{:04}{}{}{}{}{}",
            self.full_year, self.month, self.day, self.sep, self.serial, self.check
        )
    }

    /// First two digits of the birth year
    pub fn century(&self) -> String {
        format!("{:02}", self.full_year / CENTURY)
    }

    /// Last two digits of the birth year
    pub fn year(&self) -> String {
        format!("{:02}", self.full_year % CENTURY)
    }

    /// Four digit birth year
    pub fn full_year(&self) -> String {
        format!("{:04}", self.full_year)
    }

    /// Birth month, zero padded
    pub fn month(&self) -> String {
        self.month.to_string()
    }

    /// The day as written, i.e. with the coordination offset
    pub fn day(&self) -> String {
        self.day.to_string()
    }

    /// `-`, or `+` from the hundredth birth year on
    pub fn sep(&self) -> String {
        self.sep.to_string()
    }

    /// Three digit serial
    pub fn num(&self) -> String {
        self.serial.to_string()
    }

    /// Luhn check digit
    pub fn check(&self) -> String {
        self.check.to_string()
    }

    pub const fn separator(&self) -> Separator {
        self.sep
    }

    pub const fn serial(&self) -> Serial {
        self.serial
    }

    pub const fn birth_day(&self) -> BirthDay {
        self.day
    }

    /// Returns the value of a named field.
    pub fn get(&self, field: Field) -> String {
        self.format_separated_long()
            .get(field.span())
            .map(str::to_owned)
            .unwrap_or_default()
    }

    /// Looks a field up by name, handing back the diagnostic for an
    /// undeclared name instead of logging it.
    ///
    /// # Errors
    /// Returns [`Diagnostic::UnknownProperty`] when `name` is not a field.
    pub fn lookup(&self, name: &str) -> Result<String, Diagnostic> {
        name.parse::<Field>()
            .map(|field| self.get(field))
            .map_err(|UnknownField(name)| Diagnostic::UnknownProperty(name))
    }

    /// Looks a field up by name.
    ///
    /// An undeclared name yields `None` and logs
    /// [`Diagnostic::UnknownProperty`].
    pub fn property(&self, name: &str) -> Option<String> {
        self.lookup(name).inspect_err(Diagnostic::emit).ok()
    }

    /// Returns whether `name` is a declared field.
    pub fn has_property(&self, name: &str) -> bool {
        name.parse::<Field>().is_ok()
    }

    /// Date of birth, with the coordination offset removed
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Whole years since birth, as of the clock the number was parsed with.
    pub fn age(&self) -> i32 {
        self.age_at(self.clock.now())
    }

    /// Whole years between midnight of the birth date and `now`.
    ///
    /// Negative when `now` precedes the birth date: the result is then minus
    /// the number of whole years still to go.
    pub fn age_at(&self, now: NaiveDateTime) -> i32 {
        let birth = self.date.and_time(NaiveTime::MIN);
        if now >= birth {
            whole_years(birth, now)
        } else {
            -whole_years(now, birth)
        }
    }

    pub const fn is_male(&self) -> bool {
        self.serial.sex_digit() % 2 == 1
    }

    pub const fn is_female(&self) -> bool {
        !self.is_male()
    }

    pub const fn is_coordination_number(&self) -> bool {
        self.day.is_coordination()
    }

    /// Interim numbers carry a letter in the serial, which the parser never
    /// accepts.
    pub const fn is_interim_number(&self) -> bool {
        false
    }
}

/// Completed years from `from` to `to`, assuming `from <= to`
fn whole_years(from: NaiveDateTime, to: NaiveDateTime) -> i32 {
    let years = to.year() - from.year();
    if (to.month(), to.day(), to.time()) < (from.month(), from.day(), from.time()) {
        years - 1
    } else {
        years
    }
}

impl Personnummer {
    const fn identity(&self) -> (u16, Month, BirthDay, Separator, Serial, u8) {
        (
            self.full_year,
            self.month,
            self.day,
            self.sep,
            self.serial,
            self.check,
        )
    }
}

impl PartialEq for Personnummer {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Personnummer {}

impl Hash for Personnummer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for Personnummer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

impl FromStr for Personnummer {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Personnummer {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<u64> for Personnummer {
    type Error = ParseError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_integer(value, &Options::default())
    }
}

impl serde::Serialize for Personnummer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.format(true))
    }
}

impl<'de> serde::Deserialize<'de> for Personnummer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
