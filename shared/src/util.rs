/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Milliseconds in one minute
pub const MINUTE_MS: i64 = 60 * 1000;

/// Milliseconds in one hour
pub const HOUR_MS: i64 = 60 * MINUTE_MS;

/// Milliseconds in one day
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Format Unix millis as `YYYY-MM-DD HH:MM` (UTC) for display payloads
pub fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
