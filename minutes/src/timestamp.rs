//! Entry timestamp parsing.
//!
//! Entries only carry a time of day such as `-  11:16:51 AM`; the date comes
//! from the page header. The surrounding characters vary between entries, so
//! the time is located by pattern rather than by position.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::markup::Region;

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}):(\d{2}):(\d{2})\s*([AaPp][Mm])").expect("valid time regex")
});

/// Finds a 12-hour `H:MM:SS AM|PM` time anywhere in `fragment`.
///
/// Returns `None` if no such pattern exists or the matched digits are not a
/// valid time of day.
#[must_use]
pub fn parse_time_of_day(fragment: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(fragment)?;

    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let second: u32 = caps[3].parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    let pm = caps[4].eq_ignore_ascii_case("pm");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Combines the time found in `fragment` with `date`.
///
/// A fragment without a recognisable time is logged and yields `None`.
#[must_use]
pub fn parse_timestamp_text(fragment: &str, date: NaiveDate) -> Option<NaiveDateTime> {
    match parse_time_of_day(fragment.trim()) {
        Some(time) => Some(date.and_time(time)),
        None => {
            warn!(fragment = %fragment.trim(), "failed to parse timestamp");
            None
        }
    }
}

/// Parses the timestamp held in the visible text of `region`.
#[must_use]
pub fn parse_timestamp<R: Region>(region: &R, date: NaiveDate) -> Option<NaiveDateTime> {
    parse_timestamp_text(&region.visible_text(), date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Page;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 3, 5).unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn parses_fixture_fragment() {
        let ts = parse_timestamp_text("-  11:16:51 AM", date()).expect("timestamp");
        assert_eq!(ts.date(), date());
        assert_eq!(ts.time(), time(11, 16, 51));
    }

    #[test]
    fn parses_single_digit_hour() {
        assert_eq!(parse_time_of_day("9:30:00 AM"), Some(time(9, 30, 0)));
    }

    #[test]
    fn converts_afternoon_to_24_hour() {
        assert_eq!(parse_time_of_day("- 2:05:09 PM -"), Some(time(14, 5, 9)));
    }

    #[test]
    fn handles_noon_and_midnight() {
        assert_eq!(parse_time_of_day("12:00:00 PM"), Some(time(12, 0, 0)));
        assert_eq!(parse_time_of_day("12:00:00 AM"), Some(time(0, 0, 0)));
    }

    #[test]
    fn missing_pattern_yields_none() {
        assert_eq!(parse_timestamp_text("Prayers", date()), None);
        assert_eq!(parse_timestamp_text("", date()), None);
    }

    #[test]
    fn out_of_range_values_yield_none() {
        assert_eq!(parse_time_of_day("13:00:00 PM"), None);
        assert_eq!(parse_time_of_day("0:10:00 AM"), None);
        assert_eq!(parse_time_of_day("10:61:00 AM"), None);
    }

    #[test]
    fn parses_from_markup_region() {
        let page = Page::parse_fragment(r#"<div class="timeStamp">-  11:16:51 AM</div>"#);
        let div = page
            .root()
            .find("div", Some("timeStamp"))
            .expect("timestamp div");
        let ts = parse_timestamp(&div, date()).expect("timestamp");
        assert_eq!(ts.time(), time(11, 16, 51));
    }
}
