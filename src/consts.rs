/// Length of the short form `YYMMDDNNNC`
pub const SHORT_LEN: usize = 10;
/// Length of the short separated form `YYMMDD-NNNC`
pub const SHORT_SEPARATED_LEN: usize = 11;
/// Length of the long form `CCYYMMDDNNNC`
pub const LONG_LEN: usize = 12;
/// Length of the long separated form `CCYYMMDD-NNNC`
pub const LONG_SEPARATED_LEN: usize = 13;

/// Index of the separator in the short separated form
pub const SHORT_SEPARATOR_INDEX: usize = 6;
/// Index of the separator in the long separated form
pub const LONG_SEPARATOR_INDEX: usize = 8;

/// Separator used while the holder is younger than a century
pub const MINUS_SEPARATOR: char = '-';
/// Separator used once the holder has turned a century
pub const PLUS_SEPARATOR: char = '+';

/// Number of years after which the separator flips to `+`
pub const CENTENARIAN_AGE: i32 = 100;

/// Offset added to the day of month in a coordination number
pub const COORDINATION_DAY_OFFSET: u8 = 60;
/// First encoded day of a coordination number (real day 1)
pub const MIN_COORDINATION_DAY: u8 = MIN_DAY + COORDINATION_DAY_OFFSET;
/// Last encoded day of a coordination number (real day 31)
pub const MAX_COORDINATION_DAY: u8 = MAX_DAY + COORDINATION_DAY_OFFSET;

/// Latest birth year that fits the four digit long form
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;
/// Longest month length
pub const MAX_DAY: u8 = 31;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;
