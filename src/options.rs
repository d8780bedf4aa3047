//! Per-parse configuration and the non-fatal diagnostics it can produce.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::{TypeError, value_kind};
use crate::prelude::*;

const ALLOW_COORDINATION_NUMBER: &str = "allowCoordinationNumber";
const CLOCK: &str = "clock";
const SYSTEM_CLOCK: &str = "system";

/// Accepted spellings of a fixed clock instant, tried in order
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "now" for century inference and age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Clock {
    /// Local wall-clock time
    #[default]
    System,
    /// A frozen instant
    Fixed(NaiveDateTime),
}

impl Clock {
    pub const fn fixed(now: NaiveDateTime) -> Self {
        Self::Fixed(now)
    }

    pub fn now(&self) -> NaiveDateTime {
        match *self {
            Self::System => Local::now().naive_local(),
            Self::Fixed(now) => now,
        }
    }

    /// Parses `"system"` or a local timestamp such as `2020-01-01 12:00`.
    ///
    /// A bare date means midnight.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(SYSTEM_CLOCK) {
            return Some(Self::System);
        }

        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(Self::Fixed)
    }
}

/// Options accepted by the parser.
///
/// Serialized names follow the camelCase keys used by other personnummer
/// libraries, so a JSON options object can be shared between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Accept coordination numbers (day of month + 60)
    pub allow_coordination_number: bool,
    pub clock: Clock,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allow_coordination_number: true,
            clock: Clock::System,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_coordination_numbers(mut self, allow: bool) -> Self {
        self.allow_coordination_number = allow;
        self
    }

    #[must_use]
    pub const fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds options from a loosely typed JSON object.
    ///
    /// Unknown keys and values of the wrong shape never fail the call: they
    /// keep the default and come back as diagnostics, which are also logged
    /// at `warn` level. `null` yields the defaults.
    ///
    /// # Errors
    /// Returns `TypeError` when `value` is neither an object nor `null`.
    pub fn from_json(value: &Value) -> Result<(Self, Vec<Diagnostic>), TypeError> {
        let map = match value {
            Value::Null => return Ok((Self::default(), Vec::new())),
            Value::Object(map) => map,
            other => {
                return Err(TypeError::new("an options object", value_kind(other)));
            },
        };

        let mut options = Self::default();
        let mut diagnostics = Vec::new();

        for (key, value) in map {
            match key.as_str() {
                ALLOW_COORDINATION_NUMBER => match value {
                    Value::Bool(allow) => options.allow_coordination_number = *allow,
                    other => diagnostics.push(Diagnostic::InvalidOptionValue {
                        key:    key.clone(),
                        reason: format!("expected a boolean, got {}", value_kind(other)),
                    }),
                },
                CLOCK => match value {
                    Value::Null => options.clock = Clock::System,
                    Value::String(s) => match Clock::parse(s) {
                        Some(clock) => options.clock = clock,
                        None => diagnostics.push(Diagnostic::InvalidOptionValue {
                            key:    key.clone(),
                            reason: format!("unrecognized timestamp {s:?}"),
                        }),
                    },
                    other => diagnostics.push(Diagnostic::InvalidOptionValue {
                        key:    key.clone(),
                        reason: format!("expected a timestamp string, got {}", value_kind(other)),
                    }),
                },
                _ => diagnostics.push(Diagnostic::UnknownOption(key.clone())),
            }
        }

        for diagnostic in &diagnostics {
            diagnostic.emit();
        }

        Ok((options, diagnostics))
    }
}

/// A non-fatal problem: execution continued with a default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Diagnostic {
    #[display(fmt = "unrecognized option `{_0}` ignored")]
    UnknownOption(String),
    #[display(fmt = "invalid value for option `{key}`: {reason}")]
    InvalidOptionValue { key: String, reason: String },
    #[display(fmt = "undefined property `{_0}`")]
    UnknownProperty(String),
}

impl Diagnostic {
    pub(crate) fn emit(&self) {
        tracing::warn!(diagnostic = %self, "personnummer diagnostic");
    }
}
