//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::CalendarError;

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4712 BC, proleptic Gregorian
/// calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if `month` is not in `1..=12`, `day` does not
    /// exist in that month, or `year` is outside `-4712..=1000000`.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert!(Date::from_gregorian(2023, 2, 29).is_err());
    /// ```
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        if !(-4712..=1_000_000).contains(&year) {
            return Err(CalendarError::YearOutOfRange { year });
        }
        check_month_day(year, month, day)?;

        let (y, m, d) = (year, month as i32, day as i32);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .map_err(|_| CalendarError::YearOutOfRange { year })
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, u32, u32) {
        let jdn = i32::try_from(self.jdn).expect("jdn >= 2**31 not supported");
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year, month as u32, day as u32)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> u32 {
        self.jdn % 7 + 1
    }
}

/// Formats the date in ISO 8601 format.
///
/// ```
/// use nongli::Date;
///
/// let date = Date::from_gregorian(2000, 1, 1).unwrap();
/// assert_eq!("2000-01-01", date.to_string());
/// ```
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.gregorian();
        write!(f, "{:04}-{:02}-{:02}", y, m, d)
    }
}

/// Parses an ISO 8601 `YYYY-MM-DD` date.
///
/// ```
/// use nongli::Date;
///
/// let date: Date = "2024-02-10".parse().unwrap();
/// assert_eq!((2024, 2, 10), date.gregorian());
/// ```
impl FromStr for Date {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || CalendarError::Parse {
            input: s.to_owned(),
        };
        let mut it = s.trim().rsplitn(3, '-');
        let (Some(d), Some(m), Some(y)) = (it.next(), it.next(), it.next()) else {
            return Err(parse_err());
        };
        let y = y.parse().map_err(|_| parse_err())?;
        let m = m.parse().map_err(|_| parse_err())?;
        let d = d.parse().map_err(|_| parse_err())?;
        Self::from_gregorian(y, m, d)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in `1..=12`.
///
/// # Example
///
/// ```
/// use nongli::date::days_in_month;
///
/// assert_eq!(Ok(29), days_in_month(2024, 2));
/// assert_eq!(Ok(28), days_in_month(1900, 2));
/// ```
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 => Ok(28 + YearType::from_gregorian(year).is_leap() as u32),
        _ => Err(CalendarError::InvalidMonth { month }),
    }
}

/// Checks that `month` and `day` form a valid date in Gregorian `year`,
/// without checking the year itself.
pub(crate) fn check_month_day(year: i32, month: u32, day: u32) -> Result<(), CalendarError> {
    let max_day = days_in_month(year, month)?;
    if !(1..=max_day).contains(&day) {
        return Err(CalendarError::InvalidDay {
            day,
            month,
            max_day,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
        let date = Date::from_gregorian(1900, 1, 31).unwrap();
        assert_eq!(2415051, date.jdn());
    }

    #[test]
    fn from_gregorian_rejects_invalid() {
        assert_eq!(
            Err(CalendarError::InvalidMonth { month: 13 }),
            Date::from_gregorian(2024, 13, 1)
        );
        assert_eq!(
            Err(CalendarError::InvalidMonth { month: 0 }),
            Date::from_gregorian(2024, 0, 1)
        );
        assert_eq!(
            Err(CalendarError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28
            }),
            Date::from_gregorian(1900, 2, 29)
        );
        assert_eq!(
            Err(CalendarError::InvalidDay {
                day: 0,
                month: 4,
                max_day: 30
            }),
            Date::from_gregorian(2024, 4, 0)
        );
        assert_eq!(
            Err(CalendarError::YearOutOfRange { year: -5000 }),
            Date::from_gregorian(-5000, 1, 1)
        );
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn to_day_of_week() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(4, date.day_of_week());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(3, date.day_of_week());
        let date = Date::from_gregorian(2026, 2, 1).unwrap();
        assert_eq!(7, date.day_of_week());
    }

    #[test]
    fn arithmetic() {
        let a = Date::from_gregorian(2024, 2, 28).unwrap();
        let b = a + 2;
        assert_eq!((2024, 3, 1), b.gregorian());
        assert_eq!(2, b - a);
        assert_eq!(a, b + -2);
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().to_string()
        );
    }

    #[test]
    fn parse() {
        for s in ["1900-01-31", "2024-02-29", "2100-12-31"] {
            let date: Date = s.parse().unwrap();
            assert_eq!(s, date.to_string());
        }
        assert_eq!(
            Ok(Date::from_gregorian(2024, 2, 10).unwrap()),
            " 2024-2-10 ".parse()
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        for s in ["", "2024", "2024-02", "2024/02/10", "2024-xx-10"] {
            assert_eq!(
                Err(CalendarError::Parse { input: s.to_owned() }),
                s.parse::<Date>(),
                "{s:?}"
            );
        }
        assert!(matches!(
            "2023-02-29".parse::<Date>(),
            Err(CalendarError::InvalidDay { .. })
        ));
    }

    #[test]
    fn month_lengths() {
        let total: u32 = (1..=12).map(|m| days_in_month(2024, m).unwrap()).sum();
        assert_eq!(366, total);
        assert_eq!(Ok(28), days_in_month(2100, 2));
        assert_eq!(Ok(29), days_in_month(2000, 2));
        assert_eq!(
            Err(CalendarError::InvalidMonth { month: 13 }),
            days_in_month(2024, 13)
        );
    }
}
