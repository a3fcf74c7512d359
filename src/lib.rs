//! Utilities for converting Gregorian dates into the Chinese lunar calendar.
//!
//! The conversion is table driven: one packed record per lunar year gives
//! the length of every month and the position of the leap month, covering
//! lunar years 1900 through 2100 (1900-01-31 to 2101-01-28). Solar to lunar
//! conversion accepts Gregorian dates from 1900-01-31 to 2100-12-31.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use nongli::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Chinese lunar calendar:
//!
//! ```
//! use nongli::chinese::{self, HolidayStatus};
//!
//! let lunar = chinese::solar_to_lunar(2024, 2, 10).unwrap().unwrap();
//! assert_eq!("甲辰年（龙） 正月初一", format!(
//!     "{}年（{}） {}{}",
//!     lunar.year_gan_zhi, lunar.animal, lunar.month_str, lunar.day_str,
//! ));
//!
//! assert_eq!(Ok(Some("春节")), chinese::festival(2024, 2, 10));
//! assert_eq!(Ok(Some(HolidayStatus::Workday)), chinese::holiday_status(2026, 1, 4));
//! ```
//!
//! Dates outside the table are not errors, they simply have no lunar
//! counterpart:
//!
//! ```
//! use nongli::chinese::solar_to_lunar;
//!
//! assert_eq!(Ok(None), solar_to_lunar(1899, 12, 31));
//! ```

pub mod chinese;
pub mod date;
pub mod error;

pub use date::{Date, YearType};
pub use error::{CalendarError, HolidayDataError};
