/// Game configuration
/// Built once at startup, validated, then passed by reference into
/// World, Player, Raycaster and Renderer constructors
use crate::voxel::Material;
use glam::{UVec3, Vec3};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub render: RenderConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub raycast: RaycastConfig,
    pub glyphs: GlyphConfig,
    /// Target delay between frames in milliseconds
    pub frame_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            raycast: RaycastConfig::default(),
            glyphs: GlyphConfig::default(),
            frame_delay_ms: 20,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::info!("[GameConfig] Loaded {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render;
        if render.width == 0 || render.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "render resolution must be non-zero, got {}x{}",
                render.width, render.height
            )));
        }
        if !(render.fov_horizontal > 0.0 && render.fov_horizontal < std::f32::consts::PI)
            || !(render.fov_vertical > 0.0 && render.fov_vertical < std::f32::consts::PI)
        {
            return Err(ConfigError::Invalid(format!(
                "field of view must be in (0, π), got {}x{}",
                render.fov_horizontal, render.fov_vertical
            )));
        }

        if self.world.extents.min_element() == 0 {
            return Err(ConfigError::Invalid(format!(
                "world extents must be non-zero, got {}",
                self.world.extents
            )));
        }

        self.player.validate()?;

        // NaN fails every comparison below
        if !(self.raycast.max_range > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max ray range must be positive, got {}",
                self.raycast.max_range
            )));
        }
        if !(0.0..0.5).contains(&self.raycast.edge_threshold) {
            return Err(ConfigError::Invalid(format!(
                "edge threshold must be in [0, 0.5), got {}",
                self.raycast.edge_threshold
            )));
        }

        log::debug!("[GameConfig] Configuration validated");
        Ok(())
    }
}

/// Pixel grid and projection parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Columns of the character buffer
    pub width: usize,
    /// Rows of the character buffer
    pub height: usize,
    /// Horizontal field of view (radians)
    pub fov_horizontal: f32,
    /// Vertical field of view (radians)
    pub fov_vertical: f32,
    /// Cast rows in parallel with rayon
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 180,
            fov_horizontal: 1.0,
            fov_vertical: 0.7,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Terrain {
    /// Bottom `ground_height` layers filled with ground
    Flat { ground_height: u32 },
    /// Perlin heightmap
    Hills {
        seed: u32,
        base_height: u32,
        amplitude: f32,
    },
}

impl Default for Terrain {
    fn default() -> Self {
        Terrain::Flat { ground_height: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid size along x, y (horizontal) and z (height)
    pub extents: UVec3,
    pub terrain: Terrain,
    /// Material used when the player places a block
    pub build_material: Material,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            extents: UVec3::new(20, 20, 10),
            terrain: Terrain::default(),
            build_material: Material::Ground,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial eye position
    pub spawn: Vec3,
    /// Distance from feet to eye
    pub eye_height: f32,
    /// Cells per move intent
    pub move_speed: f32,
    /// Radians per turn intent
    pub tilt_speed: f32,
    /// Downward acceleration in cells/s²
    pub gravity: f32,
    /// Pitch is clamped to ±max_pitch
    pub max_pitch: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(10.0, 10.0, 5.5),
            eye_height: 1.5,
            move_speed: 0.3,
            tilt_speed: 0.1,
            gravity: 25.0,
            max_pitch: 1.5,
        }
    }
}

impl PlayerConfig {
    /// Also checked by `Player::new`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spawn.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "spawn must be finite, got {}",
                self.spawn
            )));
        }
        if !(self.move_speed >= 0.0 && self.tilt_speed >= 0.0 && self.gravity >= 0.0)
            || !(self.move_speed.is_finite() && self.tilt_speed.is_finite() && self.gravity.is_finite())
        {
            return Err(ConfigError::Invalid(format!(
                "player speeds and gravity must be finite and not negative, got move {} tilt {} gravity {}",
                self.move_speed, self.tilt_speed, self.gravity
            )));
        }
        if !(self.eye_height > 0.0 && self.eye_height.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "eye height must be positive, got {}",
                self.eye_height
            )));
        }
        if !(self.max_pitch > 0.0 && self.max_pitch < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::Invalid(format!(
                "max pitch must be in (0, π/2), got {}",
                self.max_pitch
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Rays stop after travelling this far
    pub max_range: f32,
    /// Fraction of a cell width treated as a block edge
    pub edge_threshold: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            max_range: 64.0,
            edge_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    pub background: char,
    pub edge: char,
    pub highlight: char,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            background: ' ',
            edge: '-',
            highlight: 'o',
        }
    }
}
