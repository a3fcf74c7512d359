//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序採用預製的月長表推算 1900 至 2100 年農曆，見 [`table`]。自 1900 年正月初一
//! （公曆 1900 年 1 月 31 日）起逐年、逐月累減日數，即得所求日期的農曆年月日。

use serde::Serialize;
use tracing::trace;

use crate::date::{self, Date};
use crate::error::CalendarError;

pub mod festival;
pub mod fmt;
pub mod holiday;
pub mod table;

pub use festival::{festival, festival_on, lunar_festival, lunar_festival_dates, solar_festival};
pub use holiday::{HolidayCalendar, HolidayStatus, holiday_status};
pub use table::{FIRST_YEAR, LAST_YEAR, YearInfo};

/// 1900 年正月初一的儒略日數，即公曆 1900 年 1 月 31 日。
const EPOCH_JDN: u32 = 2_415_051;

/// 表中首個農曆年的首日（1900 年 1 月 31 日）。
pub fn epoch() -> Date {
    Date::from_jdn(EPOCH_JDN)
}

/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「腊月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 逐月推算時所處階段。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum LeapPhase {
    /// 尚未到閏月所隨的平月
    BeforeLeap,
    /// 下一個月即為閏月
    InLeap,
    /// 閏月已過，或該年無閏月
    AfterLeap,
}

/// 依序列出一年各月及其日數，閏月緊隨同序號的平月之後。
///
/// # 用例
///
/// ```
/// use nongli::chinese::{Months, YearInfo, Month::*};
///
/// let months: Vec<_> = Months::new(YearInfo::get(2023).unwrap())
///     .map(|(month, _)| month)
///     .take(4)
///     .collect();
/// assert_eq!(vec![Common(1), Common(2), Leap(2), Common(3)], months);
/// ```
#[derive(Debug, Clone)]
pub struct Months {
    info: YearInfo,
    next: u32,
    phase: LeapPhase,
}

impl Months {
    /// 自正月起列出 `info` 所記年份的各月。
    pub fn new(info: YearInfo) -> Self {
        let phase = if info.leap_month() == 0 {
            LeapPhase::AfterLeap
        } else {
            LeapPhase::BeforeLeap
        };
        Self {
            info,
            next: 1,
            phase,
        }
    }
}

impl Iterator for Months {
    type Item = (Month, u32);

    fn next(&mut self) -> Option<Self::Item> {
        use LeapPhase::*;
        if self.phase == InLeap {
            self.phase = AfterLeap;
            return Some((Month::Leap(self.info.leap_month()), self.info.leap_days()));
        }
        let month = self.next;
        let days = self.info.month_days(month)?;
        self.next += 1;
        if self.phase == BeforeLeap && month == self.info.leap_month() {
            self.phase = InLeap;
        }
        Some((Month::Common(month), days))
    }
}

/// 月首信息
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LunarMonth {
    /// 月名
    pub month: Month,
    /// 月首所在日期
    pub first_day: Date,
    /// 該月日數，29 或 30
    pub days: u32,
}

/// 一個農曆年（正月初一至除夕）的月份排列。
///
/// # 用例
///
/// ```
/// use nongli::Date;
/// use nongli::chinese::{LunarYear, Month::*};
///
/// let date = Date::from_gregorian(2000, 1, 1).unwrap();
/// let year = LunarYear::from_date(date).unwrap();
///
/// assert_eq!(Ok((1999, Common(11), 25)), year.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct LunarYear {
    /// 農曆年份，以正月初一所在公元年計
    pub year: i32,
    /// 該年月長記錄
    pub info: YearInfo,
    /// 全部月份，含閏月
    pub months: Vec<LunarMonth>,
    start: Date,
    end: Date,
}

impl LunarYear {
    /// 取得農曆 `year` 年。
    ///
    /// 若表中無該年資料則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::chinese::LunarYear;
    ///
    /// let year = LunarYear::new(2024).unwrap();
    /// assert_eq!("2024-02-10", year.first_day().to_string());
    /// ```
    pub fn new(year: i32) -> Option<Self> {
        let info = YearInfo::get(year)?;
        let offset: u32 = (FIRST_YEAR..year).filter_map(table::year_days).sum();
        Some(Self::starting_at(year, info, epoch() + offset as i32))
    }

    /// 依特定日期取得其所在農曆年。
    ///
    /// 日期早於 1900 年正月初一或晚於 2100 年除夕則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::Date;
    /// use nongli::chinese::LunarYear;
    ///
    /// let date = Date::from_gregorian(2024, 2, 9).unwrap();
    /// assert_eq!(2023, LunarYear::from_date(date).unwrap().year);
    /// ```
    pub fn from_date(date: Date) -> Option<Self> {
        let mut offset = date - epoch();
        if offset < 0 {
            trace!(%date, "date precedes the lunar table");
            return None;
        }
        let mut year = FIRST_YEAR;
        loop {
            let Some(info) = YearInfo::get(year) else {
                trace!(%date, "date follows the lunar table");
                return None;
            };
            let days = info.year_days() as i32;
            if offset < days {
                return Some(Self::starting_at(year, info, date + -offset));
            }
            offset -= days;
            year += 1;
        }
    }

    fn starting_at(year: i32, info: YearInfo, start: Date) -> Self {
        let mut first_day = start;
        let months = Months::new(info)
            .map(|(month, days)| {
                let m = LunarMonth {
                    month,
                    first_day,
                    days,
                };
                first_day = first_day + days as i32;
                m
            })
            .collect();
        Self {
            year,
            info,
            months,
            start,
            end: first_day,
        }
    }

    /// 正月初一
    pub fn first_day(&self) -> Date {
        self.start
    }

    /// 次年正月初一，即本年末日的次日。
    pub fn end(&self) -> Date {
        self.end
    }

    /// 取得給定日期在該年的年月日，返回格式為 `(年, 月, 日)`。
    ///
    /// 若所給日期不在該年，則回報 `Err` 並指出該日期在該年之前還是之後。
    pub fn ymd_for(&self, date: Date) -> Result<(i32, Month, u32), OtherYear> {
        if date < self.start {
            return Err(OtherYear::Before);
        }
        let mut offset = (date - self.start) as u32;
        for m in &self.months {
            if offset < m.days {
                return Ok((self.year, m.month, offset + 1));
            }
            offset -= m.days;
        }
        Err(OtherYear::After)
    }

    /// 取得該年某月。該年不閏此月時，`Leap` 返回 `None`。
    pub fn month(&self, month: Month) -> Option<&LunarMonth> {
        self.months.iter().find(|m| m.month == month)
    }

    /// 取得該年某月某日的日期。月份不存在或日序號超出月長則返回 `None`。
    pub fn date_of(&self, month: Month, day: u32) -> Option<Date> {
        let m = self.month(month)?;
        if !(1..=m.days).contains(&day) {
            return None;
        }
        Some(m.first_day + (day - 1) as i32)
    }
}

/// 表示給定日期不在該年，並指出其在前還是在後。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherYear {
    Before,
    After,
}

/// 農曆日期及其文本形式。
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    /// 農曆年份，以正月初一所在公元年計
    pub year: i32,
    /// 月序號，`1..=12`，閏月與所隨平月同號
    pub month: u32,
    /// 日序號，`1..=30`
    pub day: u32,
    /// 是否閏月
    pub is_leap: bool,
    /// 年干支，如「甲辰」
    pub year_gan_zhi: String,
    /// 生肖
    pub animal: &'static str,
    /// 月名，如「闰二月」
    pub month_str: String,
    /// 日名，如「初一」
    pub day_str: String,
}

impl LunarDate {
    /// 由農曆年月日構造，並生成各項名稱。
    ///
    /// 月序號不在 `1..=12` 間或日序號不在 `1..=30` 間則返回 `None`。不檢查該年
    /// 是否有此月；需要檢查時請用 [`lunar_to_solar`]。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::chinese::{LunarDate, Month::*};
    ///
    /// let lunar = LunarDate::new(2023, Leap(2), 1).unwrap();
    /// assert_eq!("闰二月", lunar.month_str);
    /// assert_eq!(None, LunarDate::new(2023, Common(13), 1));
    /// assert_eq!(None, LunarDate::new(2023, Common(1), 31));
    /// ```
    pub fn new(year: i32, month: Month, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month.num()) || !(1..=30).contains(&day) {
            return None;
        }
        let sexagenary = sexagenary_for_year(year);
        Some(Self {
            year,
            month: month.num(),
            day,
            is_leap: month.is_leap(),
            year_gan_zhi: fmt::sexagenary(sexagenary),
            animal: fmt::zodiac(sexagenary),
            month_str: fmt::month(month),
            day_str: fmt::day(day),
        })
    }

    /// 公曆日期轉為農曆。
    ///
    /// 日期早於 1900 年正月初一或晚於公曆 2100 年 12 月 31 日則返回 `None`，與
    /// [`solar_to_lunar`] 範圍一致。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::Date;
    /// use nongli::chinese::LunarDate;
    ///
    /// let date = Date::from_gregorian(2024, 2, 10).unwrap();
    /// let lunar = LunarDate::from_date(date).unwrap();
    /// assert_eq!("甲辰", lunar.year_gan_zhi);
    /// assert_eq!("正月初一", lunar.month_str + &lunar.day_str);
    /// ```
    pub fn from_date(date: Date) -> Option<Self> {
        if date.gregorian().0 > LAST_YEAR {
            trace!(%date, "date past the last supported Gregorian year");
            return None;
        }
        let (year, month, day) = LunarYear::from_date(date)?.ymd_for(date).ok()?;
        Self::new(year, month, day)
    }

    /// 月名，含平閏
    pub fn lunar_month(&self) -> Month {
        if self.is_leap {
            Month::Leap(self.month)
        } else {
            Month::Common(self.month)
        }
    }

    /// 對應的公曆日期。
    pub fn to_solar(&self) -> Option<Date> {
        lunar_to_solar(self.year, self.lunar_month(), self.day)
    }
}

/// 公曆轉農曆。
///
/// 公曆年份不在 1900 至 2100 間，或日期早於 1900 年正月初一，則返回 `Ok(None)`。
///
/// # Errors
///
/// 月、日不是有效公曆日期時回報 [`CalendarError`]。
///
/// # 用例
///
/// ```
/// use nongli::chinese::solar_to_lunar;
///
/// let lunar = solar_to_lunar(2024, 2, 10).unwrap().unwrap();
/// assert_eq!((2024, 1, 1, false), (lunar.year, lunar.month, lunar.day, lunar.is_leap));
/// assert_eq!(None, solar_to_lunar(1899, 12, 31).unwrap());
/// assert_eq!(None, solar_to_lunar(2101, 1, 1).unwrap());
/// assert!(solar_to_lunar(2024, 2, 30).is_err());
/// ```
pub fn solar_to_lunar(
    year: i32,
    month: u32,
    day: u32,
) -> Result<Option<LunarDate>, CalendarError> {
    date::check_month_day(year, month, day)?;
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        trace!(year, "year outside the lunar table");
        return Ok(None);
    }
    let date = Date::from_gregorian(year, month, day)?;
    Ok(LunarDate::from_date(date))
}

/// 農曆轉公曆。
///
/// 年份不在表內、該年不閏此月或日序號超出月長則返回 `None`。
///
/// # 用例
///
/// ```
/// use nongli::chinese::{lunar_to_solar, Month::*};
///
/// assert_eq!("2024-02-10", lunar_to_solar(2024, Common(1), 1).unwrap().to_string());
/// assert_eq!("2023-03-22", lunar_to_solar(2023, Leap(2), 1).unwrap().to_string());
/// assert_eq!(None, lunar_to_solar(2024, Leap(1), 1));
/// ```
pub fn lunar_to_solar(year: i32, month: Month, day: u32) -> Option<Date> {
    LunarYear::new(year)?.date_of(month, day)
}

/// 取得所給公元年的干支。
///
/// # 用例
///
/// ```
/// use nongli::chinese::sexagenary_for_year;
///
/// assert_eq!(1, sexagenary_for_year(-2696));
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn epoch_is_1900_new_year() {
        assert_eq!(ymd(1900, 1, 31), epoch());
        assert_eq!(epoch(), LunarYear::new(1900).unwrap().first_day());
    }

    #[test]
    fn months_without_leap() {
        let info = YearInfo::get(2024).unwrap();
        let months: Vec<_> = Months::new(info).collect();
        assert_eq!(12, months.len());
        for (i, (month, days)) in months.iter().enumerate() {
            assert_eq!(Month::Common(i as u32 + 1), *month);
            assert_eq!(info.month_days(i as u32 + 1), Some(*days));
        }
    }

    #[test]
    fn months_with_leap() {
        use Month::*;
        let info = YearInfo::get(2023).unwrap();
        let months: Vec<_> = Months::new(info).map(|(m, _)| m).collect();
        let mut expected = vec![Common(1), Common(2), Leap(2)];
        expected.extend((3..=12).map(Common));
        assert_eq!(expected, months);
    }

    #[test]
    fn leap_phase_transitions() {
        let info = YearInfo::get(2017).unwrap();
        let mut it = Months::new(info);
        assert_eq!(LeapPhase::BeforeLeap, it.phase);
        for _ in 1..=5 {
            it.next();
            assert_eq!(LeapPhase::BeforeLeap, it.phase);
        }
        assert_eq!(Some((Month::Common(6), info.month_days(6).unwrap())), it.next());
        assert_eq!(LeapPhase::InLeap, it.phase);
        assert_eq!(Some((Month::Leap(6), info.leap_days())), it.next());
        assert_eq!(LeapPhase::AfterLeap, it.phase);
        assert_eq!(Some(Month::Common(7)), it.next().map(|(m, _)| m));

        let it = Months::new(YearInfo::get(2024).unwrap());
        assert_eq!(LeapPhase::AfterLeap, it.phase);
    }

    #[test]
    fn leap_month_in_december() {
        use Month::*;
        let info = YearInfo::get(2033).unwrap();
        assert_eq!(11, info.leap_month());
        let months: Vec<_> = Months::new(info).map(|(m, _)| m).collect();
        assert_eq!(13, months.len());
        assert_eq!(&[Common(11), Leap(11), Common(12)], &months[10..]);
    }

    #[test]
    fn month_lengths_sum_to_year() {
        for year in FIRST_YEAR..=LAST_YEAR {
            let info = YearInfo::get(year).unwrap();
            let months: Vec<_> = Months::new(info).collect();
            let expected = if info.leap_month() == 0 { 12 } else { 13 };
            assert_eq!(expected, months.len(), "{year}");
            let total: u32 = months.iter().map(|(_, d)| d).sum();
            assert_eq!(info.year_days(), total, "{year}");
        }
    }

    #[test]
    fn lunar_years_are_contiguous() {
        let mut prev = LunarYear::new(FIRST_YEAR).unwrap();
        for year in FIRST_YEAR + 1..=LAST_YEAR {
            let cur = LunarYear::new(year).unwrap();
            assert_eq!(prev.end(), cur.first_day(), "{year}");
            prev = cur;
        }
        assert_eq!(ymd(2101, 1, 29), prev.end());
    }

    #[test]
    fn new_year_days() {
        for (year, (y, m, d)) in [
            (1900, (1900, 1, 31)),
            (2000, (2000, 2, 5)),
            (2017, (2017, 1, 28)),
            (2024, (2024, 2, 10)),
            (2025, (2025, 1, 29)),
            (2026, (2026, 2, 17)),
            (2027, (2027, 2, 6)),
            (2028, (2028, 1, 26)),
            (2029, (2029, 2, 13)),
            (2030, (2030, 2, 3)),
        ] {
            assert_eq!(ymd(y, m, d), LunarYear::new(year).unwrap().first_day(), "{year}");
        }
    }

    #[test]
    fn from_date() {
        let dataset = [
            (2016, (2017, 1, 27)),
            (2017, (2017, 1, 28)),
            (2017, (2018, 2, 15)),
            (2018, (2018, 2, 16)),
        ];
        for (std, (y, m, d)) in dataset {
            assert_eq!(
                Some(std),
                LunarYear::from_date(ymd(y, m, d)).map(|a| a.year)
            );
        }
        assert!(LunarYear::from_date(ymd(1900, 1, 30)).is_none());
        assert!(LunarYear::from_date(ymd(2101, 1, 28)).is_some());
        assert!(LunarYear::from_date(ymd(2101, 1, 29)).is_none());
    }

    #[test]
    fn leap_months() {
        let stds = [
            (1, "2017-01-28"),
            (2, "2017-02-26"),
            (3, "2017-03-28"),
            (4, "2017-04-26"),
            (5, "2017-05-26"),
            (6, "2017-06-24"),
            (-6, "2017-07-23"),
            (7, "2017-08-22"),
            (8, "2017-09-20"),
            (9, "2017-10-20"),
            (10, "2017-11-18"),
            (11, "2017-12-18"),
            (12, "2018-01-17"),
        ];
        let year = LunarYear::new(2017).unwrap();
        for (std, month) in stds.iter().zip(&year.months) {
            let std_month = if std.0 > 0 {
                Month::Common(std.0 as u32)
            } else {
                Month::Leap(-std.0 as u32)
            };
            assert_eq!(
                (std_month, std.1.to_string()),
                (month.month, month.first_day.to_string())
            );
        }
        assert_eq!(stds.len(), year.months.len());
    }

    #[test]
    fn dates() {
        use Month::*;
        use OtherYear::*;
        let data = [
            ((2017, 1, 28), Ok((2017, Common(1), 1))),
            ((2017, 7, 22), Ok((2017, Common(6), 29))),
            ((2017, 7, 23), Ok((2017, Leap(6), 1))),
            ((2017, 8, 21), Ok((2017, Leap(6), 30))),
            ((2017, 8, 22), Ok((2017, Common(7), 1))),
            ((2017, 12, 17), Ok((2017, Common(10), 30))),
            ((2018, 2, 15), Ok((2017, Common(12), 30))),
            ((2017, 1, 27), Err(Before)),
            ((2018, 2, 16), Err(After)),
        ];
        let year = LunarYear::new(2017).unwrap();
        for ((y, m, d), std) in data {
            assert_eq!(std, year.ymd_for(ymd(y, m, d)), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn leap_month_boundaries() {
        // 2023 閏二月：2023-03-22 至 2023-04-19
        let check = |(y, m, d), expected: (u32, u32, bool)| {
            let lunar = LunarDate::from_date(ymd(y, m, d)).unwrap();
            assert_eq!(expected, (lunar.month, lunar.day, lunar.is_leap), "{y}-{m}-{d}");
        };
        check((2023, 3, 21), (2, 30, false));
        check((2023, 3, 22), (2, 1, true));
        check((2023, 4, 19), (2, 29, true));
        check((2023, 4, 20), (3, 1, false));
    }

    #[test]
    fn lunar_date_names() {
        let lunar = LunarDate::from_date(ymd(2023, 3, 22)).unwrap();
        assert_eq!("闰二月", lunar.month_str);
        assert_eq!("初一", lunar.day_str);
        assert_eq!("癸卯", lunar.year_gan_zhi);
        assert_eq!("兔", lunar.animal);
        assert_eq!(Month::Leap(2), lunar.lunar_month());

        let lunar = LunarDate::from_date(ymd(2000, 1, 1)).unwrap();
        assert_eq!((1999, "冬月", "廿五"), (lunar.year, &*lunar.month_str, &*lunar.day_str));
        assert_eq!("己卯", lunar.year_gan_zhi);
    }

    #[test]
    fn lunar_date_stops_with_gregorian_2100() {
        let last = LunarDate::from_date(ymd(2100, 12, 31)).unwrap();
        assert_eq!((2100, 12, 1), (last.year, last.month, last.day));
        // 農曆 2100 年臘月延至 2101-01-28
        assert!(LunarYear::from_date(ymd(2101, 1, 7)).is_some());
        assert_eq!(None, LunarDate::from_date(ymd(2101, 1, 7)));
        assert_eq!(None, LunarDate::from_date(ymd(2101, 1, 28)));
        assert_eq!(Ok(None), solar_to_lunar(2101, 1, 7));
    }

    #[test]
    fn lunar_date_rejects_bad_fields() {
        use Month::*;
        assert!(LunarDate::new(2024, Common(12), 30).is_some());
        assert!(LunarDate::new(2023, Leap(2), 29).is_some());
        assert_eq!(None, LunarDate::new(2024, Common(0), 1));
        assert_eq!(None, LunarDate::new(2024, Leap(13), 1));
        assert_eq!(None, LunarDate::new(2024, Common(1), 0));
        assert_eq!(None, LunarDate::new(2024, Common(1), 31));
    }

    #[test]
    fn lunar_date_json() {
        let lunar = LunarDate::from_date(ymd(2024, 2, 10)).unwrap();
        let json = serde_json::to_value(&lunar).unwrap();
        assert_eq!(
            serde_json::json!({
                "year": 2024,
                "month": 1,
                "day": 1,
                "isLeap": false,
                "yearGanZhi": "甲辰",
                "animal": "龙",
                "monthStr": "正月",
                "dayStr": "初一",
            }),
            json
        );
    }

    #[test]
    fn solar_to_lunar_rejects_invalid_input() {
        assert_eq!(
            Err(CalendarError::InvalidMonth { month: 13 }),
            solar_to_lunar(2024, 13, 1)
        );
        assert_eq!(
            Err(CalendarError::InvalidDay {
                day: 32,
                month: 1,
                max_day: 31
            }),
            solar_to_lunar(2024, 1, 32)
        );
        assert_eq!(Ok(None), solar_to_lunar(3000, 1, 1));
        assert_eq!(Ok(None), solar_to_lunar(1900, 1, 30));
        assert!(solar_to_lunar(1900, 1, 31).unwrap().is_some());
    }

    #[test]
    fn lunar_to_solar_rejects_missing_days() {
        use Month::*;
        let year = LunarYear::new(2024).unwrap();
        let short = (1..=12)
            .find(|&m| year.info.month_days(m) == Some(29))
            .unwrap();
        assert_eq!(None, lunar_to_solar(2024, Common(short), 30));
        assert!(lunar_to_solar(2024, Common(short), 29).is_some());
        assert_eq!(None, lunar_to_solar(2024, Common(1), 0));
        assert_eq!(None, lunar_to_solar(2024, Common(13), 1));
        assert_eq!(None, lunar_to_solar(2101, Common(1), 1));
    }

    #[test]
    fn year_sexagenary() {
        for (std, year) in [(60, -2697), (1, -2696), (17, 2000), (40, 2023), (41, 2024)] {
            assert_eq!(std, sexagenary_for_year(year));
        }
    }
}
