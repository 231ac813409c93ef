use chrono::{NaiveDateTime, NaiveTime};
use std::fmt;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// A single spreadsheet value, independent of the file format it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl Cell {
    /// Raw text field (CSV). The text is kept verbatim; columns type it
    /// once their role is known.
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(raw.to_string())
        }
    }

    /// ISO combined date-time text, with or without the `T` separator.
    pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    }

    /// Bare `HH:MM` or `HH:MM:SS` text.
    pub fn parse_time(raw: &str) -> Option<NaiveTime> {
        let raw = raw.trim();
        TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Hour cells keep only the time of a combined date-time. Text holding a
    /// date-time or a bare time becomes a time; anything else passes through
    /// unchanged.
    pub fn to_time_of_day(&self) -> Option<Cell> {
        match self {
            _ if self.is_empty() => None,
            Cell::DateTime(dt) => Some(Cell::Time(dt.time())),
            Cell::Text(s) => Some(
                Self::parse_datetime(s)
                    .map(|dt| dt.time())
                    .or_else(|| Self::parse_time(s))
                    .map_or_else(|| self.clone(), Cell::Time),
            ),
            other => Some(other.clone()),
        }
    }

    /// Integral value held by the cell, if any.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            Cell::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Cell::Text(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .map(|f| f as i64)
                })
            }
            _ => None,
        }
    }

    /// Canonical text used to compare identifiers across cell types.
    pub fn key(&self) -> String {
        match self {
            Cell::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{}", *f as i64),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Cell::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
        }
    }
}
