//! 时间工具函数
//!
//! Form input (`YYYY-MM-DD`, `HH:MM`) is interpreted as naive UTC and turned
//! into Unix millis here; repositories only see `i64`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时间字符串 (HH:MM 或 HH:MM:SS)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// 日期 + 时间 → Unix millis
pub fn date_time_to_millis(date: &str, time: &str) -> AppResult<i64> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Ok(date.and_time(time).and_utc().timestamp_millis())
}

/// 解析 `YYYY-MM-DDTHH:MM[:SS]` (也接受空格分隔)
pub fn parse_date_time_millis(value: &str) -> AppResult<i64> {
    let value = value.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or_else(|| AppError::validation(format!("Invalid date-time format: {}", value)))
}

/// 日期开始 (00:00:00) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// Today's date (UTC)
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
