use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use nongli::{CalendarError, Date};

/// Chinese lunar calendar for 1900-2100.
#[derive(Parser)]
#[command(
    name = "nongli",
    version,
    about = "Chinese lunar calendar, festivals and statutory holidays (1900-2100)"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Extra holiday schedule (TOML) merged over the built-in one.
    #[arg(long, global = true)]
    pub holidays: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the lunar date, festival and holiday status of a day.
    Lunar(LunarArgs),
    /// Print a month grid annotated with lunar days and holidays.
    Month(MonthArgs),
    /// List the festival dates of a lunar year.
    Festivals(FestivalsArgs),
}

/// Arguments for the `lunar` subcommand.
#[derive(clap::Args)]
pub struct LunarArgs {
    /// Gregorian date as YYYY-MM-DD (default: today, UTC+8).
    pub date: Option<Date>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `month` subcommand.
#[derive(clap::Args)]
pub struct MonthArgs {
    /// Gregorian month as YYYY-MM (default: this month, UTC+8).
    pub month: Option<YearMonth>,
}

/// Arguments for the `festivals` subcommand.
#[derive(clap::Args)]
pub struct FestivalsArgs {
    /// Lunar year (1900-2100).
    pub year: i32,
}

/// A Gregorian month, parsed from `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// First day of the month.
    pub fn first_day(&self) -> Result<Date, CalendarError> {
        Date::from_gregorian(self.year, self.month, 1)
    }
}

impl From<Date> for YearMonth {
    fn from(date: Date) -> Self {
        let (year, month, _) = date.gregorian();
        Self { year, month }
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || CalendarError::Parse {
            input: s.to_owned(),
        };
        let (y, m) = s.trim().rsplit_once('-').ok_or_else(parse_err)?;
        let year = y.parse().map_err(|_| parse_err())?;
        let month = m.parse().map_err(|_| parse_err())?;
        Date::from_gregorian(year, month, 1)?;
        Ok(Self { year, month })
    }
}
