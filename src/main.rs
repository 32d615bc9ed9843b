//! gfx_demos - headless rendering demos
//!
//! Runs one demo for a number of frames and writes PNG snapshots.

use std::path::PathBuf;

use clap::Parser;

use gfx_demos::config::AppConfig;
use gfx_demos::{run_demo, AppError, DemoKind};

#[derive(Parser)]
#[command(name = "gfx_demos", about = "Software-rendered graphics demos")]
struct Cli {
    /// Demo to run
    #[arg(short, long, value_enum, default_value_t = DemoKind::Burst)]
    demo: DemoKind,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<u32>,

    /// Directory holding default.toml and user.toml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Directory for PNG frames
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Command-line values win over configuration
    fn apply(&self, config: &mut AppConfig) {
        if let Some(frames) = self.frames {
            config.output.frames = frames;
        }
        if let Some(dir) = &self.output {
            config.output.directory = dir.clone();
        }
        if self.seed.is_some() {
            config.debug.seed = self.seed;
        }
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let (mut config, load_error) = match AppConfig::load_from(&cli.config_dir) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    cli.apply(&mut config);

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = load_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting {:?} demo", cli.demo);

    run_demo(cli.demo, &config)
        .map(|summary| {
            log::info!("Wrote {} frames", summary.saved.len());
        })
        .map_err(|e| {
            log::error!("{}", e);
            e
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "gfx_demos", "--demo", "terrain", "--frames", "5", "--output", "out", "--seed", "9",
        ]);
        assert_eq!(cli.demo, DemoKind::Terrain);

        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.output.frames, 5);
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.debug.seed, Some(9));
    }

    #[test]
    fn test_cli_defaults_leave_config() {
        let cli = Cli::parse_from(["gfx_demos"]);
        assert_eq!(cli.demo, DemoKind::Burst);
        assert_eq!(cli.config_dir, PathBuf::from("config"));

        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.output.frames, AppConfig::default().output.frames);
        assert!(config.debug.seed.is_none());
    }
}
