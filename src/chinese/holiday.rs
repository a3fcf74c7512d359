//! 法定節假日及調休安排
//!
//! 安排以國務院辦公廳每年公佈者為準，無從推算，只能逐年錄入。數據以 TOML 保存，
//! 每年一表：
//!
//! ```toml
//! [2026]
//! source = "国务院办公厅关于2026年部分节假日安排的通知"
//! holiday = ["1-1", "1-2", "1-3"]
//! workday = ["1-4"]
//! ```
//!
//! 內置數據見 `data/holidays.toml`。

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::Date;
use crate::error::{CalendarError, HolidayDataError};

static BUILTIN_DATA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/holidays.toml"));

/// 某日的安排
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayStatus {
    /// 放假
    Holiday,
    /// 調休上班
    Workday,
}

impl HolidayStatus {
    /// `"holiday"` 或 `"workday"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Holiday => "holiday",
            Self::Workday => "workday",
        }
    }
}

impl fmt::Display for HolidayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct YearSchedule {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    holiday: Vec<String>,
    #[serde(default)]
    workday: Vec<String>,
}

/// 節假日安排表
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    days: BTreeMap<Date, HolidayStatus>,
    sources: BTreeMap<i32, String>,
}

impl HolidayCalendar {
    /// 內置安排表，首次調用時解析。
    ///
    /// # Panics
    ///
    /// 內置數據有誤時 panic。
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<HolidayCalendar> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_toml_str(BUILTIN_DATA)
                .unwrap_or_else(|e| panic!("error parsing built-in holiday data: {e}"))
        })
    }

    /// 解析 TOML 格式的安排表。
    ///
    /// # Errors
    ///
    /// TOML 格式有誤、含未知欄位、年份或日期無效，或同一日既放假又上班時回報錯誤。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::Date;
    /// use nongli::chinese::{HolidayCalendar, HolidayStatus};
    ///
    /// let cal = HolidayCalendar::from_toml_str(r#"
    ///     [2027]
    ///     holiday = ["1-1"]
    ///     workday = ["1-3"]
    /// "#).unwrap();
    /// let date = Date::from_gregorian(2027, 1, 3).unwrap();
    /// assert_eq!(Some(HolidayStatus::Workday), cal.status(date));
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, HolidayDataError> {
        let raw: BTreeMap<String, YearSchedule> = toml::from_str(s)?;
        let mut cal = Self::default();
        for (key, schedule) in raw {
            let year: i32 = key
                .trim()
                .parse()
                .map_err(|_| HolidayDataError::InvalidYear { key: key.clone() })?;
            for entry in &schedule.holiday {
                let date = parse_entry(year, entry)?;
                cal.days.insert(date, HolidayStatus::Holiday);
            }
            for entry in &schedule.workday {
                let date = parse_entry(year, entry)?;
                if cal.days.insert(date, HolidayStatus::Workday) == Some(HolidayStatus::Holiday) {
                    return Err(HolidayDataError::Conflict {
                        date: date.to_string(),
                    });
                }
            }
            debug!(
                year,
                holidays = schedule.holiday.len(),
                workdays = schedule.workday.len(),
                "loaded holiday schedule"
            );
            if let Some(source) = schedule.source {
                cal.sources.insert(year, source);
            }
        }
        Ok(cal)
    }

    /// 讀取 TOML 格式的安排表文件。
    ///
    /// # Errors
    ///
    /// 讀取失敗時回報 [`HolidayDataError::Io`]，其餘同 [`from_toml_str`](Self::from_toml_str)。
    pub fn from_path(path: &Path) -> Result<Self, HolidayDataError> {
        debug!(path = %path.display(), "reading holiday schedule");
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// 併入另一安排表，同一日以 `other` 為準。
    pub fn merge(&mut self, other: HolidayCalendar) {
        for (date, status) in other.days {
            match self.days.entry(date) {
                Entry::Occupied(mut e) => {
                    if *e.get() != status {
                        debug!(%date, from = %e.get(), to = %status, "holiday status overridden");
                    }
                    e.insert(status);
                }
                Entry::Vacant(e) => {
                    e.insert(status);
                }
            }
        }
        self.sources.extend(other.sources);
    }

    /// 某日的安排；無記錄返回 `None`。
    pub fn status(&self, date: Date) -> Option<HolidayStatus> {
        self.days.get(&date).copied()
    }

    /// 列出公曆 `year` 年 `month` 月有安排的日子。
    ///
    /// # Errors
    ///
    /// `month` 無效時回報 [`CalendarError`]。
    pub fn days_in(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<(Date, HolidayStatus)>, CalendarError> {
        let first = Date::from_gregorian(year, month, 1)?;
        let last = Date::from_gregorian(year, month, crate::date::days_in_month(year, month)?)?;
        Ok(self
            .days
            .range(first..=last)
            .map(|(&date, &status)| (date, status))
            .collect())
    }

    /// 某年安排的出處
    pub fn source(&self, year: i32) -> Option<&str> {
        self.sources.get(&year).map(String::as_str)
    }

    /// 記錄總數
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// 是否無任何記錄
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn parse_entry(year: i32, entry: &str) -> Result<Date, HolidayDataError> {
    let invalid = || HolidayDataError::InvalidEntry {
        year,
        entry: entry.to_owned(),
    };
    let (m, d) = entry.trim().split_once('-').ok_or_else(invalid)?;
    let m = m.parse().map_err(|_| invalid())?;
    let d = d.parse().map_err(|_| invalid())?;
    Date::from_gregorian(year, m, d).map_err(|source| HolidayDataError::Date {
        year,
        entry: entry.to_owned(),
        source,
    })
}

/// 依內置安排表查某日是放假、調休上班，或無記錄。
///
/// # Errors
///
/// 所給不是有效公曆日期時回報 [`CalendarError`]。
///
/// # 用例
///
/// ```
/// use nongli::chinese::{holiday_status, HolidayStatus};
///
/// assert_eq!(Ok(Some(HolidayStatus::Holiday)), holiday_status(2026, 1, 1));
/// assert_eq!(Ok(Some(HolidayStatus::Workday)), holiday_status(2026, 1, 4));
/// assert_eq!(Ok(None), holiday_status(2026, 3, 15));
/// ```
pub fn holiday_status(
    year: i32,
    month: u32,
    day: u32,
) -> Result<Option<HolidayStatus>, CalendarError> {
    let date = Date::from_gregorian(year, month, day)?;
    Ok(HolidayCalendar::builtin().status(date))
}
