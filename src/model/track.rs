//! Track library schema
//!
//! Curated columns for the fields a DJ track library carries, and the
//! bundled sample library shown when no library file is configured.

use crate::engine::{ColumnDescriptor, Row, Value};
use regex::Regex;
use std::sync::OnceLock;

/// Known track fields, in display order
pub const TRACK_FIELDS: [&str; 7] = ["title", "artist", "bpm", "key", "energy", "genre", "duration"];

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:(\d+):)?(\d{1,2}):([0-5]\d)$").expect("duration pattern is valid")
    })
}

/// Parse `m:ss` or `h:mm:ss` into seconds
pub fn parse_duration(text: &str) -> Option<f64> {
    let caps = duration_pattern().captures(text.trim())?;
    let hours: f64 = match caps.get(1) {
        Some(h) => h.as_str().parse().ok()?,
        None => 0.0,
    };
    let minutes: f64 = caps[2].parse().ok()?;
    let seconds: f64 = caps[3].parse().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Format seconds back to `m:ss` (or `h:mm:ss` past an hour)
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Curated descriptor for a known track field
pub fn track_column(field: &str) -> Option<ColumnDescriptor> {
    let column = match field {
        "title" => ColumnDescriptor::text("title", "Title"),
        "artist" => ColumnDescriptor::text("artist", "Artist"),
        "bpm" => ColumnDescriptor::number("bpm", "BPM")
            .width(9)
            .render(|value, _, _| match value.as_number() {
                Some(bpm) => format!("{} BPM", Value::Number(bpm)),
                None => String::new(),
            }),
        "key" => ColumnDescriptor::text("key", "Key").width(5),
        "energy" => ColumnDescriptor::number("energy", "Energy")
            .width(8)
            .render(|value, _, _| match value.as_number() {
                Some(energy) => format!("{:.1}", energy),
                None => String::new(),
            }),
        "genre" => ColumnDescriptor::text("genre", "Genre"),
        "duration" => ColumnDescriptor::number("duration", "Time")
            .width(8)
            .render(|value, _, _| match value {
                Value::Number(seconds) => format_duration(*seconds),
                other => other.to_text(),
            }),
        _ => return None,
    };
    Some(column)
}

/// Normalize known fields in place (durations to seconds)
pub fn normalize(row: &mut Row) {
    let seconds = match row.get("duration") {
        Value::Text(text) => parse_duration(text),
        _ => None,
    };
    if let Some(seconds) = seconds {
        row.insert("duration", seconds);
    }
}

/// The demo library shown when no file is configured
pub fn sample_library() -> Vec<Row> {
    let tracks: [(i64, &str, &str, i64, &str, f64, &str, &str); 7] = [
        (1, "Summer Vibes", "DJ Alex", 126, "8A", 7.2, "House", "4:32"),
        (2, "Night Drive", "Urban Beats", 132, "5B", 8.1, "Techno", "5:18"),
        (3, "Ocean Dreams", "Deep House Co", 120, "3A", 6.5, "Deep House", "6:24"),
        (4, "Electric Soul", "Synth Masters", 128, "11B", 7.8, "Electronic", "4:45"),
        (5, "Summer Nights", "Deep House Collective", 126, "8A", 7.2, "Deep House", "4:32"),
        (6, "Electric Dreams", "Synth Masters", 128, "8B", 8.1, "Electronic", "3:45"),
        (7, "Midnight Drive", "Urban Beats", 124, "7A", 6.8, "Techno", "5:12"),
    ];

    tracks
        .iter()
        .map(|(id, title, artist, bpm, key, energy, genre, duration)| {
            let mut row = Row::new()
                .with("id", *id)
                .with("title", *title)
                .with("artist", *artist)
                .with("bpm", *bpm)
                .with("key", *key)
                .with("energy", *energy)
                .with("genre", *genre)
                .with("duration", *duration);
            normalize(&mut row);
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("4:32"), Some(272.0));
        assert_eq!(parse_duration("1:02:03"), Some(3723.0));
        assert_eq!(parse_duration(" 0:59 "), Some(59.0));
        assert_eq!(parse_duration("4:75"), None);
        assert_eq!(parse_duration("House"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(272.0), "4:32");
        assert_eq!(format_duration(3723.0), "1:02:03");
        assert_eq!(format_duration(5.0), "0:05");
    }

    #[test]
    fn test_track_column_renders() {
        let row = Row::new().with("bpm", 126i64).with("energy", 7.0).with("duration", 272.0);
        assert_eq!(track_column("bpm").unwrap().display(&row, 0), "126 BPM");
        assert_eq!(track_column("energy").unwrap().display(&row, 0), "7.0");
        assert_eq!(track_column("duration").unwrap().display(&row, 0), "4:32");
        assert!(track_column("label").is_none());
    }

    #[test]
    fn test_track_column_missing_value_renders_empty() {
        let row = Row::new();
        assert_eq!(track_column("bpm").unwrap().display(&row, 0), "");
        assert_eq!(track_column("duration").unwrap().display(&row, 0), "");
    }

    #[test]
    fn test_sample_library_durations_are_seconds() {
        let rows = sample_library();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].get("duration"), &Value::Number(272.0));
    }
}
