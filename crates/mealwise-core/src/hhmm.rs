//! `HH:MM` (24h) wall-clock helpers and a serde adapter for [`NaiveTime`].

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%H:%M";

/// Parse `HH:MM`.
pub fn parse(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s.trim(), FORMAT)
}

/// Format as `HH:MM`.
pub fn format(t: NaiveTime) -> String {
    t.format(FORMAT).to_string()
}

/// Whole hour `hours_before` earlier than `t`, minutes dropped. Clamps at 00:00.
pub fn hours_before(t: NaiveTime, hours_before: u32) -> NaiveTime {
    let hour = t.hour().saturating_sub(hours_before);
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*t))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        let t = parse("18:30").unwrap();
        assert_eq!(format(t), "18:30");
        assert!(parse("6pm").is_err());
    }

    #[test]
    fn hours_before_drops_minutes_and_clamps() {
        assert_eq!(format(hours_before(parse("18:30").unwrap(), 2)), "16:00");
        assert_eq!(format(hours_before(parse("01:15").unwrap(), 2)), "00:00");
    }
}
