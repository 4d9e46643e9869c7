mod cli;
mod config;
mod error;
mod ops;
mod playback;
mod types;
mod ui;

use clap::Parser;
use gstreamer as gst;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::types::session::SourceContext;
use crate::ui::app::RangePlayApp;

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    cli.log_builder(std::env::var("RUST_LOG").ok().as_deref()).init();

    let config = match &cli.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("failed to load config {}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    if let Err(err) = gst::init() {
        log::error!("failed to initialize GStreamer: {}", err);
        std::process::exit(1);
    }

    let media = cli.media.clone().or_else(|| config.media.clone());
    let source = SourceContext::new(None, config.segment_set());
    log::info!("starting with {} segment(s)", source.segments.len());

    let mut app = RangePlayApp::new(&config, source);
    if let Some(path) = media {
        app.open_media(path);
    }

    let (width, height) = config.preview_size;
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([width as f32 + 460.0, height as f32 + 160.0]),
        ..Default::default()
    };
    eframe::run_native(
        "RangePlay",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
