use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rangeplay")]
#[command(author, version, about = "Play a video confined to a set of time ranges")]
pub struct Cli {
    /// Media file to open on startup (overrides the config file)
    pub media: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Logger at Info (Debug with `--verbose`). Directives in `rust_log`,
    /// normally the `RUST_LOG` value, are applied last and win.
    pub fn log_builder(&self, rust_log: Option<&str>) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
        if let Some(filters) = rust_log {
            builder.parse_filters(filters);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["rangeplay", "clip.mp4", "-c", "cuts.json", "-v"]).unwrap();
        assert_eq!(cli.media, Some(PathBuf::from("clip.mp4")));
        assert_eq!(cli.config, Some(PathBuf::from("cuts.json")));
        assert!(cli.verbose);

        let bare = Cli::try_parse_from(["rangeplay"]).unwrap();
        assert!(bare.media.is_none());
        assert!(!bare.verbose);
    }

    #[test]
    fn test_rust_log_overrides_default_level() {
        let quiet = Cli::try_parse_from(["rangeplay"]).unwrap();
        assert_eq!(quiet.log_builder(None).build().filter(), log::LevelFilter::Info);
        assert_eq!(
            quiet.log_builder(Some("warn")).build().filter(),
            log::LevelFilter::Warn
        );

        let verbose = Cli::try_parse_from(["rangeplay", "-v"]).unwrap();
        assert_eq!(verbose.log_builder(None).build().filter(), log::LevelFilter::Debug);
        assert_eq!(
            verbose.log_builder(Some("error")).build().filter(),
            log::LevelFilter::Error
        );
    }
}
