//! Headless frame loop
//!
//! Stands in for a display's animation-frame callback: a simulated clock
//! advances by a fixed interval, the demo updates and draws, and selected
//! frames are written to disk.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{AppConfig, OutputConfig};
use crate::demos::{Demo, DemoKind};
use crate::error::AppError;
use crate::systems::{FrameClock, RenderSystem};

/// What a run produced
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    /// Written images in frame order
    pub saved: Vec<PathBuf>,
    /// Fragments written over the whole run
    pub fragments: usize,
}

/// Random source for a run: fixed when a seed is given
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// File name for a saved frame
pub fn frame_file_name(frame: u64) -> String {
    format!("{:04}.png", frame)
}

/// Build `kind` from `config` and run it
pub fn run_demo(kind: DemoKind, config: &AppConfig) -> Result<RunSummary, AppError> {
    let mut rng = make_rng(config.debug.seed);
    let mut demo = kind.build(config, &mut rng)?;
    let mut render = RenderSystem::new(&config.output, &config.camera, &config.rendering)?;
    run_frames(demo.as_mut(), &mut render, &config.output, config.debug.timing_every)
}

/// Drive `demo` for `output.frames` frames
pub fn run_frames(
    demo: &mut dyn Demo,
    render: &mut RenderSystem,
    output: &OutputConfig,
    timing_every: u32,
) -> Result<RunSummary, AppError> {
    let mut clock = FrameClock::new();
    let mut summary = RunSummary::default();
    log::info!(
        "Running {} for {} frames at {}x{}",
        demo.name(),
        output.frames,
        output.width,
        output.height
    );

    for i in 0..output.frames {
        let timing = clock.tick(f64::from(i) * output.frame_interval_ms);
        demo.update(&timing);
        demo.draw(render);

        let stats = render.frame_stats();
        summary.fragments += stats.fragments_written;
        if timing_every > 0 && timing.frame % u64::from(timing_every) == 0 {
            log::debug!(
                "frame {}: t={:.0}ms dt={:.1}ms fps={} triangles={} fragments={}",
                timing.frame,
                timing.elapsed_ms,
                timing.delta_ms,
                timing.fps,
                stats.triangles_submitted,
                stats.fragments_written
            );
        }

        if output.save_every > 0 && timing.frame % u64::from(output.save_every) == 0 {
            let path = output.directory.join(frame_file_name(timing.frame));
            render.save_png(&path)?;
            summary.saved.push(path);
        }
    }

    summary.frames = clock.frames();
    log::info!(
        "Finished {}: {} frames, {} written to {}",
        demo.name(),
        summary.frames,
        summary.saved.len(),
        output.directory.display()
    );
    Ok(summary)
}
