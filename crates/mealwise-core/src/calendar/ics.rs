//! iCalendar (RFC 5545) serialization.
//!
//! Timestamps are floating local time (`YYYYMMDDTHHMMSS`, no `Z`), matching
//! what calendar apps import as wall-clock events. Lines end in CRLF and are
//! folded at 75 octets.

use chrono::{Local, NaiveDateTime};

use super::CalendarEvent;

const PRODID: &str = "-//Mealwise//Meal Planner//EN";
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";
const MAX_LINE_OCTETS: usize = 75;
const ALARM_TRIGGER: &str = "-PT15M";

/// Calendar-level properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub calendar_name: String,
    /// Emitted as `X-WR-TIMEZONE` when set.
    pub timezone: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            calendar_name: "Meal Plan".to_owned(),
            timezone: Some("Asia/Kolkata".to_owned()),
        }
    }
}

/// Escape TEXT per RFC 5545 §3.3.11.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push_str("\\n");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Inverse of [`escape_text`]. Unknown escapes are kept verbatim.
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some(';') => out.push(';'),
            Some(',') => out.push(','),
            Some('n' | 'N') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Fold one content line into CRLF-separated physical lines of at most 75
/// octets, never splitting a UTF-8 sequence.
fn fold_line(line: &str, out: &mut String) {
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if used + len > budget {
            out.push_str("\r\n ");
            // Continuation lines lose one octet to the leading space.
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(c);
        used += len;
    }
    out.push_str("\r\n");
}

/// Undo folding: join continuation lines and split on line breaks.
pub fn unfold_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        match raw.strip_prefix([' ', '\t']) {
            Some(rest) if !lines.is_empty() => {
                if let Some(last) = lines.last_mut() {
                    last.push_str(rest);
                }
            }
            _ if raw.is_empty() => {}
            _ => lines.push(raw.to_owned()),
        }
    }
    lines
}

fn uid(event: &CalendarEvent) -> String {
    format!("{}-{}@mealwise", event.id, event.date.format("%Y%m%d"))
}

/// Serialize `events` with a fixed `DTSTAMP`.
pub fn to_ics_at(events: &[CalendarEvent], options: &ExportOptions, stamp: NaiveDateTime) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_owned(),
        "VERSION:2.0".to_owned(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_owned(),
        "METHOD:PUBLISH".to_owned(),
        format!("X-WR-CALNAME:{}", escape_text(&options.calendar_name)),
    ];
    if let Some(tz) = &options.timezone {
        lines.push(format!("X-WR-TIMEZONE:{tz}"));
    }

    let dtstamp = stamp.format(STAMP_FORMAT).to_string();
    for event in events {
        let start = event.date.and_time(event.start_time);
        let end = event.date.and_time(event.end_time);
        let summary = escape_text(&event.title);
        lines.extend([
            "BEGIN:VEVENT".to_owned(),
            format!("UID:{}", uid(event)),
            format!("DTSTAMP:{dtstamp}"),
            format!("DTSTART:{}", start.format(STAMP_FORMAT)),
            format!("DTEND:{}", end.format(STAMP_FORMAT)),
            format!("SUMMARY:{summary}"),
            format!("DESCRIPTION:{}", escape_text(&event.description)),
            "BEGIN:VALARM".to_owned(),
            format!("TRIGGER:{ALARM_TRIGGER}"),
            "ACTION:DISPLAY".to_owned(),
            format!("DESCRIPTION:{summary}"),
            "END:VALARM".to_owned(),
            "END:VEVENT".to_owned(),
        ]);
    }
    lines.push("END:VCALENDAR".to_owned());

    let mut out = String::new();
    for line in &lines {
        fold_line(line, &mut out);
    }
    out
}

/// Serialize `events`, stamped with the current local time.
pub fn to_ics(events: &[CalendarEvent], options: &ExportOptions) -> String {
    to_ics_at(events, options, Local::now().naive_local())
}
