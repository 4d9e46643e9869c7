//! Error type shared by the I/O-facing parts of rangeplay.
//!
//! The confinement core (time codes, segment sets, the engine) never fails;
//! only configuration loading and the GStreamer adapter produce these.

use gstreamer as gst;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading a config or media file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file was not valid JSON for [`crate::config::AppConfig`].
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A GStreamer element or call failed.
    #[error("GStreamer error: {0}")]
    Gst(String),

    /// The pipeline refused a state change (play/pause).
    #[error("state change failed: {0}")]
    StateChange(#[from] gst::StateChangeError),

    /// A config value was outside its allowed range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn gst<S: Into<String>>(msg: S) -> Self {
        Self::Gst(msg.into())
    }

    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<gst::glib::BoolError> for Error {
    fn from(err: gst::glib::BoolError) -> Self {
        Self::Gst(err.to_string())
    }
}

impl From<gst::glib::Error> for Error {
    fn from(err: gst::glib::Error) -> Self {
        Self::Gst(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
