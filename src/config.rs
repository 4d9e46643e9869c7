use crate::error::{Error, Result};
use crate::playback::recheck::MAX_RECHECK_DELAY;
use crate::types::segment_set::SegmentSet;
use crate::types::time_range::TimeRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub media: Option<PathBuf>,
    /// Delay before checking that a segment jump actually landed.
    pub recheck_delay_ms: u64,
    pub repaint_interval_ms: u64,
    pub preview_size: (u32, u32),
    /// Segments to start with, in the same text form the user types.
    pub segments: Vec<SegmentEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentEntry {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub label: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            media: None,
            recheck_delay_ms: 100,
            repaint_interval_ms: 16,
            preview_size: (640, 360),
            segments: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let max_ms = MAX_RECHECK_DELAY.as_millis() as u64;
        if self.recheck_delay_ms == 0 || self.recheck_delay_ms > max_ms {
            return Err(Error::invalid_config(format!(
                "recheck_delay_ms must be between 1 and {}, got {}",
                max_ms, self.recheck_delay_ms
            )));
        }
        if self.repaint_interval_ms == 0 {
            return Err(Error::invalid_config("repaint_interval_ms must be positive"));
        }
        if self.preview_size.0 == 0 || self.preview_size.1 == 0 {
            return Err(Error::invalid_config("preview_size must be non-zero"));
        }
        Ok(())
    }

    pub fn recheck_delay(&self) -> Duration {
        Duration::from_millis(self.recheck_delay_ms)
    }

    pub fn repaint_interval(&self) -> Duration {
        Duration::from_millis(self.repaint_interval_ms)
    }

    pub fn segment_set(&self) -> SegmentSet {
        SegmentSet::from_ranges(
            self.segments
                .iter()
                .map(|entry| TimeRange::from_text(&entry.start, &entry.end, &entry.label))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_with_segments() {
        let file = write_config(
            r#"{
                "media": "/videos/match.mp4",
                "recheck_delay_ms": 80,
                "segments": [
                    { "start": "0:10", "end": "0:20", "label": "kickoff" },
                    { "start": "1:00", "end": "oops" }
                ]
            }"#,
        );
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.media, Some(PathBuf::from("/videos/match.mp4")));
        assert_eq!(config.recheck_delay(), Duration::from_millis(80));
        assert_eq!(config.repaint_interval_ms, 16);
        assert_eq!(config.segments[1].label, "");

        let set = config.segment_set();
        assert_eq!(set.len(), 2);
        let view = set.valid_sorted_view();
        assert_eq!(view.len(), 1);
        assert_eq!((view[0].start, view[0].end), (10.0, 20.0));
        assert_eq!(view[0].label, "kickoff");
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let file = write_config("{}");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.recheck_delay_ms, 100);
        assert_eq!(config.preview_size, (640, 360));
        assert!(config.segments.is_empty());
    }

    #[test]
    fn test_recheck_delay_out_of_range() {
        let file = write_config(r#"{ "recheck_delay_ms": 500 }"#);
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let zero = AppConfig {
            recheck_delay_ms: 0,
            ..AppConfig::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let file = write_config("{ not json");
        assert!(matches!(AppConfig::load(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/rangeplay.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
