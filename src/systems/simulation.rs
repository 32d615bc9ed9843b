//! Frame timing
//!
//! The clock is driven by timestamps rather than reading the wall clock, so
//! the same code serves a real display loop and a simulated headless one.

/// Largest step handed to the simulation, in milliseconds
pub const MAX_DELTA_MS: f64 = 250.0;

/// Timing for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTiming {
    /// Milliseconds since the first tick
    pub elapsed_ms: f64,
    /// Milliseconds since the previous tick, capped at [`MAX_DELTA_MS`]
    pub delta_ms: f64,
    /// Zero-based frame number
    pub frame: u64,
    /// Instantaneous frames per second, 0 on the first frame
    pub fps: u32,
}

impl FrameTiming {
    pub fn seconds(&self) -> f32 {
        (self.elapsed_ms / 1000.0) as f32
    }

    pub fn dt(&self) -> f32 {
        (self.delta_ms / 1000.0) as f32
    }
}

/// Turns timestamps into [`FrameTiming`]s
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    start_ms: Option<f64>,
    last_ms: f64,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> FrameTiming {
        let (start, delta_ms, frame) = match self.start_ms {
            None => {
                self.start_ms = Some(now_ms);
                (now_ms, 0.0, 0)
            }
            // Cap dt so a stall doesn't blow up the physics
            Some(start) => (start, (now_ms - self.last_ms).clamp(0.0, MAX_DELTA_MS), self.frame + 1),
        };
        self.last_ms = now_ms;
        self.frame = frame;

        let fps = if delta_ms > 0.0 {
            (1000.0 / delta_ms).round() as u32
        } else {
            0
        };
        FrameTiming {
            elapsed_ms: now_ms - start,
            delta_ms,
            frame,
            fps,
        }
    }

    /// Frames ticked so far
    pub fn frames(&self) -> u64 {
        if self.start_ms.is_some() {
            self.frame + 1
        } else {
            0
        }
    }
}
