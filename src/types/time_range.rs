use crate::ops::timecode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which text field of a [`TimeRange`] an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Start,
    End,
    Label,
}

/// A user-entered segment. The raw text is what the user sees; the seconds are
/// derived from it on every edit and are `None` while the text doesn't parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub raw_start: String,
    pub raw_end: String,
    pub label: String,
    #[serde(skip)]
    pub start_seconds: Option<f64>,
    #[serde(skip)]
    pub end_seconds: Option<f64>,
}

impl TimeRange {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_start: String::new(),
            raw_end: String::new(),
            label: String::new(),
            start_seconds: None,
            end_seconds: None,
        }
    }

    /// Builds a range from text the same way a sequence of user edits would.
    pub fn from_text(start: &str, end: &str, label: &str) -> Self {
        let mut range = Self::new();
        range.set(RangeField::Start, start);
        range.set(RangeField::End, end);
        range.set(RangeField::Label, label);
        range
    }

    pub fn set(&mut self, field: RangeField, text: &str) {
        match field {
            RangeField::Start => {
                self.raw_start = text.to_string();
                self.start_seconds = timecode::parse(text);
            }
            RangeField::End => {
                self.raw_end = text.to_string();
                self.end_seconds = timecode::parse(text);
            }
            RangeField::Label => self.label = text.to_string(),
        }
    }

    /// Re-derives seconds from the raw text, e.g. after deserializing.
    pub fn reparse(&mut self) {
        self.start_seconds = timecode::parse(&self.raw_start);
        self.end_seconds = timecode::parse(&self.raw_end);
    }

    /// Both bounds parsed, start not negative and start strictly before end.
    /// The media duration bound is checked later, once duration is known.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.raw_start.trim().is_empty() || self.raw_end.trim().is_empty() {
            return None;
        }
        match (self.start_seconds, self.end_seconds) {
            (Some(start), Some(end)) if start >= 0.0 && start < end => Some((start, end)),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.bounds().is_some()
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_range_is_empty_and_invalid() {
        let range = TimeRange::new();
        assert_eq!(range.raw_start, "");
        assert_eq!(range.start_seconds, None);
        assert!(!range.is_valid());
    }

    #[test]
    fn test_set_rederives_seconds() {
        let mut range = TimeRange::new();
        range.set(RangeField::Start, "0:10");
        assert_eq!(range.start_seconds, Some(10.0));
        range.set(RangeField::Start, "0:1x");
        assert_eq!(range.start_seconds, None);
        assert_eq!(range.raw_start, "0:1x");
    }

    #[test]
    fn test_bounds_require_increasing_pair() {
        assert_eq!(TimeRange::from_text("10", "20", "").bounds(), Some((10.0, 20.0)));
        assert_eq!(TimeRange::from_text("20", "20", "").bounds(), None);
        assert_eq!(TimeRange::from_text("30", "20", "").bounds(), None);
        assert_eq!(TimeRange::from_text("-5", "20", "").bounds(), None);
        assert_eq!(TimeRange::from_text("10", "", "").bounds(), None);
    }

    #[test]
    fn test_reparse_after_deserialize() {
        let json = r#"{"raw_start":"1:00","raw_end":"1:30","label":"chorus"}"#;
        let mut range: TimeRange = serde_json::from_str(json).unwrap();
        assert_eq!(range.start_seconds, None);
        range.reparse();
        assert_eq!(range.bounds(), Some((60.0, 90.0)));
        assert_eq!(range.label, "chorus");
    }
}
