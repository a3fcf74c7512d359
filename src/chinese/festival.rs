//! 傳統節日與公曆節日

use crate::date::Date;
use crate::error::CalendarError;

use super::{LunarDate, LunarYear, Month, solar_to_lunar};

/// 農曆節日，以 `(月, 日)` 為鍵
const LUNAR_FESTIVALS: &[((u32, u32), &str)] = &[
    ((1, 1), "春节"),
    ((1, 15), "元宵节"),
    ((2, 2), "龙抬头"),
    ((5, 5), "端午节"),
    ((7, 7), "七夕节"),
    ((7, 15), "中元节"),
    ((8, 15), "中秋节"),
    ((9, 9), "重阳节"),
    ((12, 8), "腊八节"),
    ((12, 23), "小年"),
];

/// 公曆節日，以 `(月, 日)` 為鍵
const SOLAR_FESTIVALS: &[((u32, u32), &str)] = &[
    ((1, 1), "元旦"),
    ((2, 14), "情人节"),
    ((3, 8), "妇女节"),
    ((3, 12), "植树节"),
    ((4, 1), "愚人节"),
    ((5, 1), "劳动节"),
    ((5, 4), "青年节"),
    ((6, 1), "儿童节"),
    ((7, 1), "建党节"),
    ((8, 1), "建军节"),
    ((9, 10), "教师节"),
    ((10, 1), "国庆节"),
    ((12, 25), "圣诞节"),
];

fn lookup(table: &[((u32, u32), &'static str)], month: u32, day: u32) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == (month, day))
        .map(|&(_, name)| name)
}

/// 農曆節日。只比對月日，不論平閏。
///
/// # 用例
///
/// ```
/// use nongli::chinese::lunar_festival;
///
/// assert_eq!(Some("春节"), lunar_festival(1, 1));
/// assert_eq!(None, lunar_festival(6, 15));
/// ```
pub fn lunar_festival(month: u32, day: u32) -> Option<&'static str> {
    lookup(LUNAR_FESTIVALS, month, day)
}

/// 公曆節日。
///
/// # 用例
///
/// ```
/// use nongli::chinese::solar_festival;
///
/// assert_eq!(Some("元旦"), solar_festival(1, 1));
/// assert_eq!(None, solar_festival(3, 15));
/// ```
pub fn solar_festival(month: u32, day: u32) -> Option<&'static str> {
    lookup(SOLAR_FESTIVALS, month, day)
}

/// 某日的節日。公曆節日優先；否則以該日的農曆月日查農曆節日。
///
/// 日期不在 [`LunarDate::from_date`] 所及範圍內時只查公曆節日。
pub fn festival_on(date: Date) -> Option<&'static str> {
    let (_, month, day) = date.gregorian();
    solar_festival(month, day).or_else(|| {
        let lunar = LunarDate::from_date(date)?;
        lunar_festival(lunar.month, lunar.day)
    })
}

/// 某公曆日期的節日。公曆節日優先；否則經 [`solar_to_lunar`] 取農曆月日，
/// 其返回 `None` 時不查農曆節日。
///
/// # Errors
///
/// 月、日不是有效公曆日期時回報 [`CalendarError`]。
///
/// # 用例
///
/// ```
/// use nongli::chinese::festival;
///
/// assert_eq!(Ok(Some("元旦")), festival(2024, 1, 1));
/// assert_eq!(Ok(Some("春节")), festival(2024, 2, 10));
/// assert_eq!(Ok(None), festival(2024, 3, 15));
/// ```
pub fn festival(year: i32, month: u32, day: u32) -> Result<Option<&'static str>, CalendarError> {
    Date::from_gregorian(year, month, day)?;
    if let Some(name) = solar_festival(month, day) {
        return Ok(Some(name));
    }
    let lunar = solar_to_lunar(year, month, day)?;
    Ok(lunar.and_then(|l| lunar_festival(l.month, l.day)))
}

/// 列出農曆 `year` 年各農曆節日的公曆日期，按日期排序。只取平月。
///
/// 年份不在表內則返回 `None`。
///
/// # 用例
///
/// ```
/// use nongli::chinese::lunar_festival_dates;
///
/// let dates = lunar_festival_dates(2026).unwrap();
/// assert_eq!(("2026-02-17".to_string(), "春节"), (dates[0].0.to_string(), dates[0].1));
/// ```
pub fn lunar_festival_dates(year: i32) -> Option<Vec<(Date, &'static str)>> {
    let lunar_year = LunarYear::new(year)?;
    let mut dates: Vec<_> = LUNAR_FESTIVALS
        .iter()
        .filter_map(|&((month, day), name)| {
            lunar_year
                .date_of(Month::Common(month), day)
                .map(|date| (date, name))
        })
        .collect();
    dates.sort_by_key(|&(date, _)| date);
    Some(dates)
}
