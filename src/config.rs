//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`GFX_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use gfx_geometry::FaultTerrainParams;
use gfx_input::{InputScript, Key};
use gfx_math::{Rgba, Vec3};
use gfx_physics::{BoidConfig, BurstConfig};
use gfx_render::{OrbitCamera, Projection, RenderState, ShadingFlags};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Frame output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Particle burst demo
    #[serde(default)]
    pub burst: BurstDemoConfig,
    /// Boids demo
    #[serde(default)]
    pub boids: BoidsDemoConfig,
    /// Fault terrain demo
    #[serde(default)]
    pub terrain: TerrainDemoConfig,
    /// Sphere demo
    #[serde(default)]
    pub sphere: SphereDemoConfig,
    /// Dancing logo demo
    #[serde(default)]
    pub logo: LogoDemoConfig,
    /// Terrain flight demo
    #[serde(default)]
    pub flight: FlightDemoConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`GFX_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // GFX_OUTPUT__WIDTH=640 -> output.width = 640
        figment = figment.merge(Env::prefixed("GFX_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Headless frame output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Frames to simulate
    pub frames: u32,
    /// Simulated time between frames
    pub frame_interval_ms: f64,
    /// Write every Nth frame; 0 disables writing
    pub save_every: u32,
    /// Directory receiving `NNNN.png` files
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            frames: 120,
            frame_interval_ms: 1000.0 / 60.0,
            save_every: 10,
            directory: PathBuf::from("output"),
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Distance of the orbit camera from the origin
    pub orbit_radius: f32,
    /// Height of the orbit camera
    pub orbit_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 57.3,
            near: 0.1,
            far: 10.0,
            orbit_radius: 1.0,
            orbit_height: 1.0,
        }
    }
}

impl CameraConfig {
    pub fn to_projection(&self) -> Projection {
        Projection::new(self.fov.to_radians(), self.near, self.far)
    }

    pub fn to_orbit_camera(&self) -> OrbitCamera {
        OrbitCamera::new(self.orbit_radius, self.orbit_height)
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: Rgba,
    /// World-space direction toward the light [x, y, z]
    pub light_dir: [f32; 3],
    /// Light color [r, g, b]
    pub light_color: [f32; 3],
    /// Depth testing
    pub depth_test: bool,
    /// Alpha blending
    pub blend: bool,
    /// Blend in linear space, store sRGB
    pub srgb: bool,
    /// Time-based hue cycling for unlit demos
    pub psychedelic: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.075, 0.16, 0.292, 1.0],
            light_dir: [0.0, 1.0, 0.0],
            light_color: [1.0, 1.0, 1.0],
            depth_test: true,
            blend: true,
            srgb: false,
            psychedelic: false,
        }
    }
}

impl RenderingConfig {
    pub fn to_render_state(&self) -> RenderState {
        RenderState::default()
            .with_depth_test(self.depth_test)
            .with_blend(self.blend)
            .with_srgb(self.srgb)
    }

    /// Shading flags shared by every demo; demos add their own on top
    pub fn shading_flags(&self) -> ShadingFlags {
        let mut flags = ShadingFlags::empty();
        flags.set(ShadingFlags::SRGB, self.srgb);
        flags.set(ShadingFlags::PSYCHEDELIC, self.psychedelic);
        flags
    }

    pub fn light_dir(&self) -> Vec3 {
        self.light_dir.into()
    }
}

/// Particle burst configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstDemoConfig {
    pub count: usize,
    /// Acceleration [x, y, z]
    pub gravity: [f32; 3],
    pub damping: f32,
    pub elasticity: f32,
    pub velocity_range: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Icosphere subdivision level for the particle mesh
    pub subdivisions: u32,
}

impl Default for BurstDemoConfig {
    fn default() -> Self {
        let c = BurstConfig::default();
        Self {
            count: c.count,
            gravity: c.gravity.to_array(),
            damping: c.damping,
            elasticity: c.elasticity,
            velocity_range: c.velocity_range,
            radius_min: c.radius_min,
            radius_max: c.radius_max,
            subdivisions: 2,
        }
    }
}

impl BurstDemoConfig {
    pub fn to_burst_config(&self) -> BurstConfig {
        BurstConfig {
            count: self.count,
            gravity: self.gravity.into(),
            damping: self.damping,
            elasticity: self.elasticity,
            velocity_range: self.velocity_range,
            radius_min: self.radius_min,
            radius_max: self.radius_max,
            ..BurstConfig::default()
        }
    }
}

/// Boids configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoidsDemoConfig {
    pub count: usize,
    pub size: f32,
    pub flock_distance: f32,
    pub separation_distance: f32,
    pub min_speed: f32,
    /// Radians per second at priority 1
    pub turn_rate: f32,
    pub align_priority: f32,
    pub cohesion_priority: f32,
    pub separation_priority: f32,
    /// Half-angle of a boid's view cone, in degrees
    pub view_angle: f32,
}

impl Default for BoidsDemoConfig {
    fn default() -> Self {
        let c = BoidConfig::default();
        Self {
            count: c.count,
            size: c.size,
            flock_distance: c.flock_distance,
            separation_distance: c.separation_distance,
            min_speed: c.min_speed,
            turn_rate: c.turn_rate,
            align_priority: c.align_priority,
            cohesion_priority: c.cohesion_priority,
            separation_priority: c.separation_priority,
            view_angle: c.view_angle.to_degrees(),
        }
    }
}

impl BoidsDemoConfig {
    pub fn to_boid_config(&self) -> BoidConfig {
        BoidConfig {
            count: self.count,
            size: self.size,
            flock_distance: self.flock_distance,
            separation_distance: self.separation_distance,
            min_speed: self.min_speed,
            turn_rate: self.turn_rate,
            align_priority: self.align_priority,
            cohesion_priority: self.cohesion_priority,
            separation_priority: self.separation_priority,
            view_angle: self.view_angle.to_radians(),
            ..BoidConfig::default()
        }
    }
}

/// Fault terrain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainDemoConfig {
    /// Grid samples per side
    pub resolution: usize,
    /// Number of faults
    pub slices: usize,
    pub max_fault_size: f32,
    pub height_scale: f32,
    /// Add a specular highlight
    pub shiny: bool,
    pub shininess: f32,
}

impl Default for TerrainDemoConfig {
    fn default() -> Self {
        let p = FaultTerrainParams::default();
        Self {
            resolution: p.resolution,
            slices: p.slices,
            max_fault_size: p.max_fault_size,
            height_scale: p.height_scale,
            shiny: false,
            shininess: 32.0,
        }
    }
}

impl TerrainDemoConfig {
    pub fn to_terrain_params(&self) -> FaultTerrainParams {
        FaultTerrainParams {
            resolution: self.resolution,
            slices: self.slices,
            max_fault_size: self.max_fault_size,
            height_scale: self.height_scale,
        }
    }
}

/// Sphere configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereDemoConfig {
    /// Latitude bands; longitude uses twice as many
    pub rings: usize,
    pub radius: f32,
    pub color: Rgba,
    pub shiny: bool,
    pub shininess: f32,
}

impl Default for SphereDemoConfig {
    fn default() -> Self {
        Self {
            rings: 16,
            radius: 0.5,
            color: [1.0, 0.373, 0.02, 1.0],
            shiny: true,
            shininess: 32.0,
        }
    }
}

/// Dancing logo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoDemoConfig {
    /// Uniform scale of each logo
    pub scale: f32,
    /// Starting x of the two bouncing logos
    pub start_x: [f32; 2],
    /// Velocities [vx, vy] of the two bouncing logos; mirrored pairs meet head-on
    pub velocities: [[f32; 2]; 2],
    /// Add a third logo that grows, shrinks and spins in place
    pub animated: bool,
}

impl Default for LogoDemoConfig {
    fn default() -> Self {
        Self {
            scale: 0.3,
            start_x: [-0.5, 0.5],
            velocities: [[0.7, 0.4], [-0.7, 0.4]],
            animated: true,
        }
    }
}

/// Terrain flight configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightDemoConfig {
    pub resolution: usize,
    pub slices: usize,
    /// Units per second
    pub speed: f32,
    /// Scripted key holds standing in for a keyboard
    pub script: InputScript,
}

impl Default for FlightDemoConfig {
    fn default() -> Self {
        Self {
            resolution: 100,
            slices: 50,
            speed: 1.0,
            script: InputScript::default()
                .with_hold(Key::W, 0.0, 1.0)
                .with_hold(Key::A, 0.5, 1.5),
        }
    }
}

impl FlightDemoConfig {
    pub fn to_terrain_params(&self) -> FaultTerrainParams {
        FaultTerrainParams::new(self.resolution, self.slices)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log frame timing every N frames; 0 disables it
    pub timing_every: u32,
    /// Fixed random seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            timing_every: 60,
            seed: None,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
