mod cli;
mod logging;

use std::fmt::Write as _;
use std::path::Path;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use nongli::Date;
use nongli::chinese::{self, HolidayCalendar, HolidayStatus, LunarDate};

use crate::cli::{Cli, Command, FestivalsArgs, LunarArgs, MonthArgs, YearMonth};

/// Julian day number of 1970-01-01.
const UNIX_EPOCH_JDN: u32 = 2_440_588;
/// Beijing time offset in seconds.
const CST_OFFSET: u64 = 8 * 3600;

const WEEKDAYS: [&str; 7] = ["一", "二", "三", "四", "五", "六", "日"];
/// Terminal columns taken by one day in the month grid.
const CELL_WIDTH: usize = 11;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let holidays = load_holidays(cli.holidays.as_deref())?;
    match cli.command {
        Command::Lunar(args) => lunar(args, &holidays),
        Command::Month(args) => month(args, &holidays),
        Command::Festivals(args) => festivals(args, &holidays),
    }
}

fn load_holidays(extra: Option<&Path>) -> Result<HolidayCalendar> {
    let mut cal = HolidayCalendar::builtin().clone();
    if let Some(path) = extra {
        let other = HolidayCalendar::from_path(path)
            .with_context(|| format!("loading holiday schedule {}", path.display()))?;
        info!(path = %path.display(), entries = other.len(), "merged holiday schedule");
        cal.merge(other);
    }
    Ok(cal)
}

/// Today's date in UTC+8.
fn today() -> Result<Date> {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    date_at(secs)
}

/// Calendar date in UTC+8 of `secs` seconds after the Unix epoch.
fn date_at(secs: u64) -> Result<Date> {
    let days = u32::try_from((secs + CST_OFFSET) / 86_400)?;
    Ok(Date::from_jdn(UNIX_EPOCH_JDN + days))
}

#[derive(Serialize)]
struct DayReport {
    date: String,
    lunar: Option<LunarDate>,
    festival: Option<&'static str>,
    holiday: Option<HolidayStatus>,
}

fn lunar(args: LunarArgs, holidays: &HolidayCalendar) -> Result<()> {
    let date = match args.date {
        Some(date) => date,
        None => today()?,
    };
    debug!(%date, "converting");
    let report = DayReport {
        date: date.to_string(),
        lunar: LunarDate::from_date(date),
        festival: chinese::festival_on(date),
        holiday: holidays.status(date),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} 星期{}",
        report.date,
        WEEKDAYS[date.day_of_week() as usize - 1]
    );
    match &report.lunar {
        Some(l) => println!(
            "{}年（{}） {}{}",
            l.year_gan_zhi, l.animal, l.month_str, l.day_str
        ),
        None => println!("不在农历表范围内（1900-01-31 至 2100-12-31）"),
    }
    if let Some(name) = report.festival {
        println!("节日：{name}");
    }
    if let Some(status) = report.holiday {
        println!("安排：{}", holiday_label(status));
    }
    Ok(())
}

fn month(args: MonthArgs, holidays: &HolidayCalendar) -> Result<()> {
    let ym = match args.month {
        Some(ym) => ym,
        None => today()?.into(),
    };
    print!("{}", render_month(ym, holidays)?);
    Ok(())
}

fn festivals(args: FestivalsArgs, holidays: &HolidayCalendar) -> Result<()> {
    let dates = chinese::lunar_festival_dates(args.year).ok_or_else(|| {
        anyhow!(
            "lunar year {} outside {}..={}",
            args.year,
            chinese::FIRST_YEAR,
            chinese::LAST_YEAR
        )
    })?;
    for (date, name) in dates {
        let mut line = format!("{date} {}", pad(name, 6));
        if let Some(status) = holidays.status(date) {
            line += holiday_label(status);
        }
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn holiday_label(status: HolidayStatus) -> &'static str {
    match status {
        HolidayStatus::Holiday => "放假",
        HolidayStatus::Workday => "调休上班",
    }
}

/// Renders a six-week grid starting on Sunday. Days outside the month are
/// left blank; holidays are marked 休 and compensatory workdays 班.
fn render_month(ym: YearMonth, holidays: &HolidayCalendar) -> Result<String> {
    let first = ym.first_day()?;
    let start = first + -((first.day_of_week() % 7) as i32);

    let mut out = String::new();
    writeln!(out, "{:^83}", format!("{}年{}月", ym.year, ym.month))?;
    let header: Vec<_> = [6, 0, 1, 2, 3, 4, 5]
        .iter()
        .map(|&i| pad(&format!("{:>6}", WEEKDAYS[i]), CELL_WIDTH))
        .collect();
    writeln!(out, "{}", header.join(" ").trim_end())?;

    for week in 0..6 {
        let cells: Vec<_> = (0..7)
            .map(|i| {
                let date = start + (week * 7 + i);
                if YearMonth::from(date) != ym {
                    return " ".repeat(CELL_WIDTH);
                }
                let (_, _, day) = date.gregorian();
                let label = LunarDate::from_date(date)
                    .map(|l| if l.day == 1 { l.month_str } else { l.day_str })
                    .unwrap_or_default();
                let mark = match holidays.status(date) {
                    Some(HolidayStatus::Holiday) => "休",
                    Some(HolidayStatus::Workday) => "班",
                    None => "",
                };
                format!("{day:>2} {}{}", pad(&label, 6), pad(mark, 2))
            })
            .collect();
        writeln!(out, "{}", cells.join(" ").trim_end())?;
    }

    if let Some(source) = holidays.source(ym.year) {
        let days = holidays.days_in(ym.year, ym.month)?;
        if !days.is_empty() {
            writeln!(out, "调休安排：{source}")?;
        }
    }
    Ok(out)
}

/// Pads `s` with spaces to `width` terminal columns, counting non-ASCII
/// characters as two columns.
fn pad(s: &str, width: usize) -> String {
    let used: usize = s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum();
    format!("{s}{}", " ".repeat(width.saturating_sub(used)))
}
