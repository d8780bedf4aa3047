//! Named parts of a personnummer.
//!
//! Every field is a fixed slice of the long separated form
//! `CCYYMMDDsNNNC`, so lookups by name never need reflection.

use std::ops::Range;
use std::str::FromStr;

use crate::prelude::*;

/// A named part of the long separated form `CCYYMMDDsNNNC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display(fmt = "century")]
    Century,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "fullYear")]
    FullYear,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "sep")]
    Sep,
    #[display(fmt = "num")]
    Num,
    #[display(fmt = "check")]
    Check,
}

/// The requested name is not one of the declared fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("undefined property `{0}`")]
pub struct UnknownField(pub String);

impl Field {
    pub const ALL: [Self; 8] = [
        Self::Century,
        Self::Year,
        Self::FullYear,
        Self::Month,
        Self::Day,
        Self::Sep,
        Self::Num,
        Self::Check,
    ];

    /// Byte range of the field within the long separated form
    pub const fn span(self) -> Range<usize> {
        match self {
            Self::Century => 0..2,
            Self::Year => 2..4,
            Self::FullYear => 0..4,
            Self::Month => 4..6,
            Self::Day => 6..8,
            Self::Sep => 8..9,
            Self::Num => 9..12,
            Self::Check => 12..13,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Century => "century",
            Self::Year => "year",
            Self::FullYear => "fullYear",
            Self::Month => "month",
            Self::Day => "day",
            Self::Sep => "sep",
            Self::Num => "num",
            Self::Check => "check",
        }
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    /// Names are case sensitive, matching the property names of other
    /// personnummer libraries.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_owned()))
    }
}
