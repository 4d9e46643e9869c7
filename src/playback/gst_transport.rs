use std::path::{Path, PathBuf};

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_pbutils as gst_pbutils;
use gstreamer_video as gst_video;

use crate::error::{Error, Result};
use crate::playback::transport::{
    EventQueue, MediaTransport, SubscriptionId, TransportEvent, TransportEventKind,
};
use crate::types::playback_state::PlaybackState;

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // RGBA, tightly packed
    pub width: u32,
    pub height: u32,
}

/// A `playbin` pipeline exposed as a [`MediaTransport`].
///
/// Video is delivered to an RGBA appsink so the UI can draw it. Notifications
/// are produced while draining: bus messages first, then a position check.
pub struct GstTransport {
    pipeline: gst::Element,
    sink: gst_app::AppSink,
    path: PathBuf,
    state: PlaybackState,
    events: EventQueue,
    last_frame_pts: Option<gst::ClockTime>,
}

impl GstTransport {
    pub fn open(path: &Path) -> Result<Self> {
        gst::init()?;

        let abs_path = std::fs::canonicalize(path)?;
        let uri = gst::glib::filename_to_uri(&abs_path, None)?;

        let sink = gst_app::AppSink::builder()
            .caps(
                &gst_video::VideoCapsBuilder::new()
                    .format(gst_video::VideoFormat::Rgba)
                    .build(),
            )
            .max_buffers(1)
            .drop(true)
            .build();

        let pipeline = gst::ElementFactory::make("playbin")
            .property("uri", uri.as_str())
            .property("video-sink", &sink)
            .build()?;

        pipeline.set_state(gst::State::Paused)?;

        let mut state = PlaybackState::new();
        if let Some(duration) = probe_duration(uri.as_str()) {
            state.duration = duration;
        }
        if state.duration_known() {
            log::info!("opened {} ({:.2}s)", abs_path.display(), state.duration);
        } else {
            log::info!("opened {} (duration pending)", abs_path.display());
        }

        Ok(Self {
            pipeline,
            sink,
            path: abs_path,
            state,
            events: EventQueue::new(),
            last_frame_pts: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Seek requested by the user (scrubber, timeline click). Unlike
    /// [`MediaTransport::set_position`] this is reported as `UserSought`.
    pub fn user_seek(&mut self, seconds: f64) -> Result<()> {
        self.seek(seconds)?;
        self.state.playhead = seconds;
        self.events.push(TransportEvent::UserSought(seconds));
        Ok(())
    }

    /// Most recent decoded frame, or `None` if nothing new arrived.
    pub fn latest_frame(&mut self) -> Option<VideoFrame> {
        let sample = if self.state.is_playing {
            self.sink.try_pull_sample(gst::ClockTime::ZERO)
        } else {
            self.sink.try_pull_preroll(gst::ClockTime::ZERO)
        }?;

        let buffer = sample.buffer()?;
        let pts = buffer.pts();
        if pts.is_some() && pts == self.last_frame_pts {
            return None;
        }

        let info = gst_video::VideoInfo::from_caps(sample.caps()?).ok()?;
        let map = buffer.map_readable().ok()?;
        let width = info.width() as usize;
        let height = info.height() as usize;
        let stride = info.stride()[0] as usize;
        let row = width * 4;
        if height == 0 || map.len() < stride * (height - 1) + row {
            log::warn!("short video buffer ({} bytes for {}x{})", map.len(), width, height);
            return None;
        }

        let mut data = Vec::with_capacity(row * height);
        for y in 0..height {
            let offset = y * stride;
            data.extend_from_slice(&map[offset..offset + row]);
        }

        self.last_frame_pts = pts;
        Some(VideoFrame {
            data,
            width: width as u32,
            height: height as u32,
        })
    }

    fn seek(&self, seconds: f64) -> Result<()> {
        let nanos = (seconds.max(0.0) * 1_000_000_000.0) as u64;
        self.pipeline
            .seek_simple(
                gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
                gst::ClockTime::from_nseconds(nanos),
            )
            .map_err(|e| Error::gst(format!("seek to {:.2}s failed: {}", seconds, e)))
    }

    fn poll(&mut self) {
        if let Some(bus) = self.pipeline.bus() {
            while let Some(msg) = bus.pop() {
                use gst::MessageView;
                match msg.view() {
                    MessageView::Eos(..) => {
                        self.state.is_playing = false;
                        self.events.push(TransportEvent::PlaybackEnded);
                    }
                    MessageView::DurationChanged(..) | MessageView::AsyncDone(..) => {
                        self.refresh_duration();
                    }
                    MessageView::Error(err) => {
                        log::error!(
                            "pipeline error from {:?}: {} ({:?})",
                            err.src().map(|s| s.path_string()),
                            err.error(),
                            err.debug()
                        );
                    }
                    _ => {}
                }
            }
        }

        if self.state.is_playing {
            if let Some(position) = self.query_position() {
                if position != self.state.playhead {
                    self.state.playhead = position;
                    self.events.push(TransportEvent::PositionAdvanced(position));
                }
            }
        }
    }

    fn refresh_duration(&mut self) {
        let Some(duration) = self
            .pipeline
            .query_duration::<gst::ClockTime>()
            .map(clock_seconds)
        else {
            return;
        };
        if duration > 0.0 && duration != self.state.duration {
            self.state.duration = duration;
            self.events.push(TransportEvent::DurationKnown(duration));
        }
    }

    fn query_position(&self) -> Option<f64> {
        self.pipeline
            .query_position::<gst::ClockTime>()
            .map(clock_seconds)
    }
}

impl MediaTransport for GstTransport {
    fn position(&self) -> f64 {
        self.query_position().unwrap_or(self.state.playhead)
    }

    fn duration(&self) -> f64 {
        self.state.duration
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        self.seek(seconds)
    }

    fn play(&mut self) -> Result<()> {
        self.pipeline.set_state(gst::State::Playing)?;
        self.state.is_playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.pipeline.set_state(gst::State::Paused)?;
        self.state.is_playing = false;
        Ok(())
    }

    fn subscribe(&mut self, kind: TransportEventKind) -> SubscriptionId {
        self.events.subscribe(kind)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.events.unsubscribe(id);
    }

    fn drain_events(&mut self) -> Vec<TransportEvent> {
        self.poll();
        self.events.drain()
    }
}

impl Drop for GstTransport {
    fn drop(&mut self) {
        self.pipeline.set_state(gst::State::Null).ok();
    }
}

fn clock_seconds(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

/// Asks the discoverer for the duration up front so confinement doesn't have
/// to wait for the pipeline to report it.
fn probe_duration(uri: &str) -> Option<f64> {
    let discoverer = gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(5)).ok()?;
    let info = discoverer.discover_uri(uri).ok()?;
    info.duration().map(clock_seconds).filter(|d| *d > 0.0)
}
