//! Error types.

/// Error returned when a Gregorian date cannot be constructed or parsed.
///
/// Dates outside the range covered by the lunar table are *not* errors;
/// conversions report them as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month number is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u32,
    },

    /// Returned when a day number exceeds the length of its month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day value.
        day: u32,
        /// The month the day was checked against.
        month: u32,
        /// Length of that month in the given year.
        max_day: u32,
    },

    /// Returned when a year is too far from the present for day arithmetic.
    #[error("year out of range: {year} (must be -4712..=1000000)")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
    },

    /// Returned when a string is not a `YYYY-MM-DD` date.
    #[error("cannot parse {input:?} as a YYYY-MM-DD date")]
    Parse {
        /// The rejected input.
        input: String,
    },
}

/// Error returned when loading a holiday schedule.
#[derive(Debug, thiserror::Error)]
pub enum HolidayDataError {
    /// Reading the schedule file failed.
    #[error("cannot read holiday schedule: {0}")]
    Io(#[from] std::io::Error),

    /// The schedule is not valid TOML or has unknown fields.
    #[error("malformed holiday schedule: {0}")]
    Toml(#[from] toml::de::Error),

    /// A top-level table key is not a year number.
    #[error("invalid year key: {key:?}")]
    InvalidYear {
        /// The offending key.
        key: String,
    },

    /// An entry is not of the form `month-day`.
    #[error("invalid entry {entry:?} in year {year} (expected \"month-day\")")]
    InvalidEntry {
        /// Year table containing the entry.
        year: i32,
        /// The offending entry.
        entry: String,
    },

    /// An entry names a day that does not exist.
    #[error("invalid date {entry:?} in year {year}: {source}")]
    Date {
        /// Year table containing the entry.
        year: i32,
        /// The offending entry.
        entry: String,
        /// Why the date was rejected.
        source: CalendarError,
    },

    /// The same day is listed as both a holiday and a workday.
    #[error("{date} is listed as both holiday and workday")]
    Conflict {
        /// The conflicting day, formatted as ISO 8601.
        date: String,
    },
}
