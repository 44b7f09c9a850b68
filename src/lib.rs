//! ASCII voxel renderer - ray-marched voxel world drawn as terminal glyphs
//! Components: world grid, player camera, DDA raycaster, glyph renderer

pub mod config;
pub mod game;
pub mod math;
pub mod perf;
pub mod player;
pub mod raycast;
pub mod rendering;
pub mod terminal;
pub mod voxel;
pub mod world;

pub use config::{
    ConfigError, GameConfig, GlyphConfig, PlayerConfig, RaycastConfig, RenderConfig, Terrain,
    WorldConfig,
};
pub use game::{Game, GameError, Intent, WorldEdit};
pub use perf::{FrameStats, PerfTimer};
pub use player::{Player, PlayerError, ViewError, ViewFrustum, ViewRays};
pub use raycast::{DdaStep, DdaWalk, HitGrid, HitRecord, Ray, Raycaster};
pub use rendering::{CharBuffer, Renderer};
pub use voxel::{Cell, Face, Material};
pub use world::{World, WorldError};
