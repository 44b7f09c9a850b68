/// Player pose, movement and gravity
/// The player's eye is the camera; feet sit `eye_height` below it
pub mod view;

pub use view::{ViewError, ViewFrustum, ViewRays};

use crate::config::{ConfigError, PlayerConfig, RenderConfig};
use crate::math::{direction_from_angles, horizontal_forward, horizontal_right, wrap_angle};
use crate::world::World;
use glam::Vec3;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    View(#[from] ViewError),
}

/// Keep the player this far inside the horizontal world edges
const EDGE_MARGIN: f32 = 0.1;
/// Feet are probed slightly above their height so resting on a block
/// does not count as standing inside it
const FOOT_CLEARANCE: f32 = 0.01;
/// Tolerance for "feet exactly on a block top"
const REST_EPSILON: f32 = 1e-4;

pub struct Player {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    vertical_velocity: f32,

    eye_height: f32,
    move_speed: f32,
    tilt_speed: f32,
    gravity: f32,
    max_pitch: f32,

    view: ViewFrustum,
}

impl Player {
    pub fn new(config: &PlayerConfig, render: &RenderConfig) -> Result<Self, PlayerError> {
        config.validate()?;
        Ok(Self {
            position: config.spawn,
            yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            eye_height: config.eye_height,
            move_speed: config.move_speed,
            tilt_speed: config.tilt_speed,
            gravity: config.gravity,
            max_pitch: config.max_pitch,
            view: ViewFrustum::new(render)?,
        })
    }

    /// Eye position
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.vertical_velocity = 0.0;
    }

    /// (yaw, pitch) in radians
    #[inline]
    pub fn orientation(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = wrap_angle(yaw);
        self.pitch = pitch.clamp(-self.max_pitch, self.max_pitch);
    }

    #[inline]
    pub fn feet(&self) -> f32 {
        self.position.z - self.eye_height
    }

    #[inline]
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Exact view direction
    #[inline]
    pub fn forward(&self) -> Vec3 {
        direction_from_angles(self.yaw, self.pitch)
    }

    /// One ray per pixel for the current pose, row-major
    pub fn view_rays(&self) -> ViewRays<'_> {
        self.view.rays(self.position, self.yaw, self.pitch)
    }

    /// Turn by deltas in units of the tilt speed.
    pub fn turn(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = wrap_angle(self.yaw + d_yaw * self.tilt_speed);
        self.pitch =
            (self.pitch + d_pitch * self.tilt_speed).clamp(-self.max_pitch, self.max_pitch);
    }

    /// Walk along the ground plane; `forward` and `strafe` are in units of
    /// the move speed. Each axis is resolved on its own so sliding along a
    /// wall keeps the unblocked component.
    pub fn move_by(&mut self, forward: f32, strafe: f32, world: &World) {
        let displacement =
            (horizontal_forward(self.yaw) * forward + horizontal_right(self.yaw) * strafe)
                * self.move_speed;
        let extents = world.extents().as_vec3();

        for axis in 0..3 {
            if displacement[axis] == 0.0 {
                continue;
            }
            let mut candidate = self.position;
            candidate[axis] += displacement[axis];
            if axis < 2 {
                candidate[axis] = candidate[axis].clamp(EDGE_MARGIN, extents[axis] - EDGE_MARGIN);
            }
            if !self.body_blocked(candidate, world) {
                self.position = candidate;
            }
        }
    }

    /// Any cell between feet and eye at `eye` is solid.
    fn body_blocked(&self, eye: Vec3, world: &World) -> bool {
        let x = eye.x.floor() as i32;
        let y = eye.y.floor() as i32;
        let foot = (eye.z - self.eye_height + FOOT_CLEARANCE).floor() as i32;
        let head = eye.z.floor() as i32;
        (foot..=head).any(|z| world.is_solid(x, y, z))
    }

    /// Feet rest on a solid cell top or on the world floor.
    pub fn is_grounded(&self, world: &World) -> bool {
        let feet = self.feet();
        if feet <= REST_EPSILON {
            return true;
        }
        let top = feet.round();
        (feet - top).abs() <= REST_EPSILON
            && world.is_solid(
                self.position.x.floor() as i32,
                self.position.y.floor() as i32,
                top as i32 - 1,
            )
    }

    /// Integrate gravity for `dt` seconds. Lands exactly on the first solid
    /// cell top crossed; a block at foot level pushes the player up onto it.
    pub fn apply_gravity(&mut self, dt: f32, world: &World) {
        self.resolve_embedding(world);

        if self.is_grounded(world) {
            self.land_at(snap_to_cell_top(self.feet().max(0.0)));
            return;
        }

        self.vertical_velocity -= self.gravity * dt;
        let feet = self.feet();
        let target = feet + self.vertical_velocity * dt;
        if target >= feet {
            self.position.z += target - feet;
            return;
        }

        let x = self.position.x.floor() as i32;
        let y = self.position.y.floor() as i32;
        let top = (feet - REST_EPSILON).floor() as i32;
        let bottom = target.floor() as i32;
        for z in (bottom..=top).rev() {
            if world.is_solid(x, y, z) {
                self.land_at((z + 1) as f32);
                return;
            }
        }

        if target <= 0.0 {
            self.land_at(0.0);
        } else {
            self.position.z = target + self.eye_height;
        }
    }

    fn land_at(&mut self, feet: f32) {
        self.position.z = feet + self.eye_height;
        self.vertical_velocity = 0.0;
    }

    /// Climb out of solid cells occupying the feet.
    fn resolve_embedding(&mut self, world: &World) {
        let x = self.position.x.floor() as i32;
        let y = self.position.y.floor() as i32;
        for _ in 0..world.extents().z {
            let foot = (self.feet() + FOOT_CLEARANCE).floor() as i32;
            if !world.is_solid(x, y, foot) {
                break;
            }
            log::debug!("[Player] Pushed out of block at ({}, {}, {})", x, y, foot);
            self.land_at((foot + 1) as f32);
        }
    }
}

/// Snap a resting height to the cell top it is within tolerance of.
#[inline]
fn snap_to_cell_top(feet: f32) -> f32 {
    let rounded = feet.round();
    if (feet - rounded).abs() <= REST_EPSILON {
        rounded
    } else {
        feet
    }
}
