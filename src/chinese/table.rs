//! 1900 至 2100 年農曆月長表
//!
//! 每年一項，以 20 位整數壓縮存儲：
//!
//! - 第 0–3 位：閏哪個月，0 表示無閏月
//! - 第 4–15 位：正月至十二月大小，自第 15 位（正月）起，1 為大月（三十日），0 為小月（廿九日）
//! - 第 16 位：閏月大小，僅在有閏月時有意義

/// 表中首年
pub const FIRST_YEAR: i32 = 1900;
/// 表中末年
pub const LAST_YEAR: i32 = 2100;

static LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5d0, 0x14573, 0x052d0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b5a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x0a2e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520, // 2100
];

/// 一年的月長記錄
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct YearInfo(u32);

impl YearInfo {
    /// 取得農曆 `year` 年的記錄。
    ///
    /// 年份不在 1900 至 2100 間則返回 `None`。
    pub fn get(year: i32) -> Option<Self> {
        let idx = usize::try_from(year.checked_sub(FIRST_YEAR)?).ok()?;
        LUNAR_INFO.get(idx).copied().map(Self)
    }

    /// 原始壓縮值
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// 閏月月序，`1..=12`；無閏月為 0。
    pub fn leap_month(&self) -> u32 {
        self.0 & 0xf
    }

    /// 閏月日數，無閏月為 0。
    pub fn leap_days(&self) -> u32 {
        match (self.leap_month(), self.0 & 0x10000) {
            (0, _) => 0,
            (_, 0) => 29,
            _ => 30,
        }
    }

    /// 平月 `month` 的日數（29 或 30）；`month` 不在 `1..=12` 則返回 `None`。
    pub fn month_days(&self, month: u32) -> Option<u32> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(if self.0 & (0x10000 >> month) != 0 {
            30
        } else {
            29
        })
    }

    /// 全年日數，含閏月。
    pub fn year_days(&self) -> u32 {
        348 + (self.0 & 0xfff0).count_ones() + self.leap_days()
    }
}

/// 農曆 `year` 年全年日數。
///
/// # 用例
///
/// ```
/// use nongli::chinese::table;
///
/// assert_eq!(Some(384), table::year_days(2023));
/// assert_eq!(None, table::year_days(1899));
/// ```
pub fn year_days(year: i32) -> Option<u32> {
    YearInfo::get(year).map(|info| info.year_days())
}

/// 農曆 `year` 年閏月日數，無閏月為 0。
pub fn leap_days(year: i32) -> Option<u32> {
    YearInfo::get(year).map(|info| info.leap_days())
}

/// 農曆 `year` 年閏哪個月，無閏月為 0。
///
/// # 用例
///
/// ```
/// use nongli::chinese::table;
///
/// assert_eq!(Some(2), table::leap_month(2023)); // 閏二月
/// assert_eq!(Some(0), table::leap_month(2024));
/// ```
pub fn leap_month(year: i32) -> Option<u32> {
    YearInfo::get(year).map(|info| info.leap_month())
}

/// 農曆 `year` 年平月 `month` 的日數。
pub fn month_days(year: i32, month: u32) -> Option<u32> {
    YearInfo::get(year)?.month_days(month)
}
