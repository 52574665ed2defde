use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw value of a single cell.
///
/// Page payloads carry plain JSON scalars; `Date` only appears after a
/// `date` column's text has been parsed at load time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
}

impl CellValue {
    /// Plain display text (dates use RFC 3339; the renderer formats them properly).
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Date(d) => d.to_rfc3339(),
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Replace parseable text with a `Date` value.
    pub fn coerce_date(&mut self) {
        if let Self::Text(s) = self {
            if let Some(date) = parse_date(s) {
                *self = Self::Date(date);
            }
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Date(d) => serializer.serialize_str(&d.to_rfc3339()),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        })
    }
}

/// A single cell: its value plus the (unused by the engine) edit payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub data: CellValue,
    #[serde(default)]
    pub edit: String,
}

impl Cell {
    pub fn new(data: impl Into<CellValue>) -> Self {
        Self {
            data: data.into(),
            edit: String::new(),
        }
    }
}

/// One row, with cells in column storage order (not display order).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub index: usize,
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(index: usize, cells: Vec<Cell>) -> Self {
        Self { index, cells }
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y/%m/%d", "%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse the textual date shapes seen in page payloads.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim().trim_matches('"');
    if text.is_empty() {
        return None;
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(text) {
        return Some(d.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn scalars_deserialize_to_matching_variants() {
        let row: Row = serde_json::from_str(
            r#"{"index": 3, "cells": [{"data": 12, "edit": ""}, {"data": "Cell 1-2"}, {"data": null}, {"data": true}]}"#,
        )
        .unwrap();
        assert_eq!(row.index, 3);
        assert_eq!(row.cells[0].data, CellValue::Number(12.0));
        assert_eq!(row.cells[1].data, CellValue::Text("Cell 1-2".into()));
        assert_eq!(row.cells[2].data, CellValue::Null);
        assert_eq!(row.cells[3].data, CellValue::Bool(true));
    }

    #[test]
    fn display_drops_trailing_fraction_for_integers() {
        assert_eq!(CellValue::Number(42.0).display(), "42");
        assert_eq!(CellValue::Number(1.5).display(), "1.5");
        assert_eq!(CellValue::Null.display(), "");
    }

    #[test]
    fn parses_backend_date_shapes() {
        let d = parse_date("2004/7/9").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2004, 7, 9));
        let d = parse_date("\"1999/12/31\"").unwrap();
        assert_eq!(d.year(), 1999);
        assert!(parse_date("2010-01-01T10:00:00Z").is_some());
        assert!(parse_date("not a date").is_none());
    }

    #[test]
    fn coerce_date_leaves_garbage_as_text() {
        let mut v = CellValue::Text("soon".into());
        v.coerce_date();
        assert_eq!(v, CellValue::Text("soon".into()));
        let mut v = CellValue::Text("2001-02-03".into());
        v.coerce_date();
        assert!(v.as_date().is_some());
    }
}
