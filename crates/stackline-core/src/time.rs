use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Wall-clock time in the local offset, falling back to UTC when the offset
/// cannot be determined (e.g. multi-threaded processes on some platforms).
pub fn now_local() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    match UtcOffset::current_local_offset() {
        Ok(offset) => now.to_offset(offset),
        Err(_) => now,
    }
}

/// `HH:MM:SS`, as shown in the status bar.
pub fn clock_label(at: OffsetDateTime) -> String {
    let format = format_description!("[hour]:[minute]:[second]");
    at.format(&format)
        .unwrap_or_else(|_| format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second()))
}
