use crate::types::segment_set::SegmentSet;
use std::path::PathBuf;

/// The media being cut and the user's segments for it. Owned by the app and
/// passed explicitly to whatever needs it.
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    pub media_path: Option<PathBuf>,
    pub segments: SegmentSet,
}

impl SourceContext {
    pub fn new(media_path: Option<PathBuf>, segments: SegmentSet) -> Self {
        SourceContext {
            media_path,
            segments,
        }
    }

    pub fn media_name(&self) -> Option<String> {
        self.media_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_name() {
        let ctx = SourceContext::new(Some(PathBuf::from("/videos/talk.mp4")), SegmentSet::new());
        assert_eq!(ctx.media_name().as_deref(), Some("talk.mp4"));
        assert_eq!(SourceContext::default().media_name(), None);
    }
}
