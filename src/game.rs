/// Game session: owns the world and player and runs one frame per tick
/// Order within a tick: player intents, gravity, at most one world edit,
/// then every ray is cast against that settled snapshot
use crate::config::{ConfigError, GameConfig};
use crate::perf::{FrameStats, PerfTimer};
use crate::player::{Player, PlayerError};
use crate::raycast::{HitRecord, Raycaster};
use crate::rendering::{CharBuffer, Renderer};
use crate::world::{World, WorldError};
use glam::IVec3;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// What the player asked for this frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Intent {
    /// Deltas in units of the tilt speed
    Turn { yaw: f32, pitch: f32 },
    /// Deltas in units of the move speed
    Move { forward: f32, strafe: f32 },
    Place,
    Break,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorldEdit {
    Placed(IVec3),
    Removed(IVec3),
}

pub struct Game {
    config: GameConfig,
    world: World,
    player: Player,
    raycaster: Raycaster,
    renderer: Renderer,
    buffer: CharBuffer,
    target: Option<HitRecord>,
    stats: FrameStats,
    running: bool,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let world = World::from_config(&config.world)?;
        Self::with_world(config, world)
    }

    /// Start a session on an existing world
    pub fn with_world(config: GameConfig, world: World) -> Result<Self, GameError> {
        config.validate()?;
        let player = Player::new(&config.player, &config.render)?;
        let raycaster = Raycaster::new(&config.raycast).with_parallel(config.render.parallel);
        let renderer = Renderer::new(&config.glyphs);
        let buffer = CharBuffer::new(config.render.width, config.render.height, renderer.background);
        let target = raycaster.target(&player, &world);

        log::info!(
            "[Game] Session ready: {}x{} view, world {}",
            config.render.width,
            config.render.height,
            world.extents()
        );

        Ok(Self {
            config,
            world,
            player,
            raycaster,
            renderer,
            buffer,
            target,
            stats: FrameStats::new(),
            running: true,
        })
    }

    /// Apply intents, advance physics by `dt` seconds, and render a frame.
    pub fn tick(&mut self, intents: &[Intent], dt: f32) -> &CharBuffer {
        let timer = PerfTimer::silent();
        self.update(intents, dt);
        self.render();
        self.stats.record_frame(timer.elapsed());
        &self.buffer
    }

    /// Player and world update without rendering. Returns the world edit
    /// made this frame, if any.
    pub fn update(&mut self, intents: &[Intent], dt: f32) -> Option<WorldEdit> {
        let mut edit_request = None;
        for intent in intents {
            match *intent {
                Intent::Turn { yaw, pitch } => self.player.turn(yaw, pitch),
                Intent::Move { forward, strafe } => {
                    self.player.move_by(forward, strafe, &self.world)
                }
                Intent::Place | Intent::Break => {
                    edit_request.get_or_insert(*intent);
                }
                Intent::Quit => {
                    log::info!("[Game] Quit requested");
                    self.running = false;
                }
            }
        }

        self.player.apply_gravity(dt, &self.world);
        self.target = self.raycaster.target(&self.player, &self.world);

        let edit = edit_request.and_then(|request| self.apply_edit(request));
        if edit.is_some() {
            self.target = self.raycaster.target(&self.player, &self.world);
        }
        edit
    }

    fn apply_edit(&mut self, request: Intent) -> Option<WorldEdit> {
        let target = self.target?;
        match request {
            Intent::Break => {
                let cell = target.cell;
                self.world
                    .remove(cell.x, cell.y, cell.z)
                    .then_some(WorldEdit::Removed(cell))
            }
            Intent::Place => {
                let face = target.face?;
                self.world
                    .place_against(target.cell, face, self.config.world.build_material)
                    .map(WorldEdit::Placed)
            }
            _ => None,
        }
    }

    /// Cast the current view and redraw the buffer. The target is
    /// recomputed so pose changes made outside `update` are highlighted.
    pub fn render(&mut self) -> &CharBuffer {
        self.target = self.raycaster.target(&self.player, &self.world);
        let rays = self.player.view_rays();
        let hits = self
            .raycaster
            .cast_frame_with_stats(&rays, &self.world, &mut self.stats);
        self.renderer
            .render_into(&hits, self.target.as_ref(), &mut self.buffer);
        &self.buffer
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[inline]
    pub fn target(&self) -> Option<&HitRecord> {
        self.target.as_ref()
    }

    #[inline]
    pub fn buffer(&self) -> &CharBuffer {
        &self.buffer
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    #[inline]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}
