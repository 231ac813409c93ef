use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::calendar::DayType;
use crate::error::{TimetableError, TimetableResult};

/// Column names and day-type labels expected in a source timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLayout {
    pub line_column: String,
    pub month_column: String,
    pub day_type_column: String,
    pub direction_column: String,
    pub labels: DayTypeLabels,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTypeLabels {
    pub weekday: String,
    pub saturday: String,
    pub sunday: String,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            line_column: "Hat No".to_string(),
            month_column: "Ay".to_string(),
            day_type_column: "Gün Tipi".to_string(),
            direction_column: "Yön".to_string(),
            labels: DayTypeLabels::default(),
        }
    }
}

impl Default for DayTypeLabels {
    fn default() -> Self {
        Self {
            weekday: "Hafta İçi".to_string(),
            saturday: "Cumartesi".to_string(),
            sunday: "Pazar".to_string(),
        }
    }
}

impl SourceLayout {
    pub fn english() -> Self {
        Self {
            line_column: "LineID".to_string(),
            month_column: "Month".to_string(),
            day_type_column: "DayType".to_string(),
            direction_column: "Direction".to_string(),
            labels: DayTypeLabels::english(),
        }
    }

    pub fn key_columns(&self) -> [&str; 4] {
        [
            self.line_column.as_str(),
            self.month_column.as_str(),
            self.day_type_column.as_str(),
            self.direction_column.as_str(),
        ]
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> TimetableResult<Self> {
        let file = File::open(path)?;
        let layout: SourceLayout = serde_json::from_reader(file)
            .map_err(|err| TimetableError::invalid_input(format!("invalid layout json: {err}")))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> TimetableResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|err| TimetableError::Io(std::io::Error::other(err)))?;
        Ok(())
    }

    pub fn validate(&self) -> TimetableResult<()> {
        let columns = self.key_columns();
        for (idx, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(TimetableError::invalid_input("layout column names must not be empty"));
            }
            if columns[..idx].contains(name) {
                return Err(TimetableError::invalid_input(format!(
                    "layout column '{name}' is used twice"
                )));
            }
        }
        let labels = [
            &self.labels.weekday,
            &self.labels.saturday,
            &self.labels.sunday,
        ];
        if labels[0] == labels[1] || labels[0] == labels[2] || labels[1] == labels[2] {
            return Err(TimetableError::invalid_input("day-type labels must be distinct"));
        }
        Ok(())
    }
}

impl DayTypeLabels {
    pub fn english() -> Self {
        Self {
            weekday: "Weekday".to_string(),
            saturday: "Saturday".to_string(),
            sunday: "Sunday".to_string(),
        }
    }

    pub fn label(&self, day_type: DayType) -> &str {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }

    /// Exact, case-sensitive match against the configured labels.
    pub fn parse(&self, label: &str) -> Option<DayType> {
        DayType::ALL
            .into_iter()
            .find(|day_type| self.label(*day_type) == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_exactly() {
        let labels = DayTypeLabels::default();
        assert_eq!(labels.parse("Hafta İçi"), Some(DayType::Weekday));
        assert_eq!(labels.parse("Cumartesi"), Some(DayType::Saturday));
        assert_eq!(labels.parse("hafta içi"), None);
        assert_eq!(labels.parse("Hafta Içi"), None);
        assert_eq!(labels.parse("Pazar "), None);
    }

    #[test]
    fn duplicate_columns_fail_validation() {
        let mut layout = SourceLayout::english();
        layout.month_column = layout.line_column.clone();
        assert!(matches!(
            layout.validate(),
            Err(TimetableError::InvalidInput(_))
        ));
    }

    #[test]
    fn layout_json_round_trip() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let layout = SourceLayout::english();
        layout.save_json(file.path()).unwrap();
        assert_eq!(SourceLayout::load_json(file.path()).unwrap(), layout);
    }
}
