/// Per-pixel ray directions
/// Camera-space directions depend only on resolution and field of view, so
/// they are computed once; each frame only applies the player's rotation
use crate::config::RenderConfig;
use crate::math::{direction_from_angles, view_rotation};
use crate::raycast::Ray;
use glam::{Quat, Vec3};

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("view resolution must be non-zero, got {width}x{height}")]
    EmptyResolution { width: usize, height: usize },

    #[error("field of view must be in (0, π), got {horizontal}x{vertical}")]
    InvalidFov { horizontal: f32, vertical: f32 },
}

#[derive(Debug, Clone)]
pub struct ViewFrustum {
    width: usize,
    height: usize,
    /// Camera-space unit directions, row-major, forward = +X
    directions: Vec<Vec3>,
}

impl ViewFrustum {
    pub fn new(config: &RenderConfig) -> Result<Self, ViewError> {
        let (width, height) = (config.width, config.height);
        if width == 0 || height == 0 {
            return Err(ViewError::EmptyResolution { width, height });
        }
        let (horizontal, vertical) = (config.fov_horizontal, config.fov_vertical);
        let valid = |fov: f32| fov > 0.0 && fov < std::f32::consts::PI;
        if !valid(horizontal) || !valid(vertical) {
            return Err(ViewError::InvalidFov {
                horizontal,
                vertical,
            });
        }

        let mut directions = Vec::with_capacity(width * height);
        for row in 0..height {
            // Top row looks up, bottom row looks down
            let pitch_offset = vertical * (0.5 - Self::fraction(row, height));
            for col in 0..width {
                // Left column looks left (smaller yaw)
                let yaw_offset = horizontal * (Self::fraction(col, width) - 0.5);
                directions.push(direction_from_angles(yaw_offset, pitch_offset));
            }
        }

        Ok(Self {
            width,
            height,
            directions,
        })
    }

    /// Position of pixel `i` across `n` pixels in [0, 1]; a single pixel sits at 0.5
    #[inline]
    fn fraction(i: usize, n: usize) -> f32 {
        if n <= 1 {
            0.5
        } else {
            i as f32 / (n - 1) as f32
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn camera_direction(&self, col: usize, row: usize) -> Vec3 {
        self.directions[row * self.width + col]
    }

    /// Rays for a pose. Nothing is computed until the rays are read.
    pub fn rays(&self, origin: Vec3, yaw: f32, pitch: f32) -> ViewRays<'_> {
        ViewRays {
            frustum: self,
            origin,
            rotation: view_rotation(yaw, pitch),
            next: 0,
        }
    }
}

/// Lazy, row-major sequence of one ray per pixel for a fixed pose
#[derive(Debug, Clone)]
pub struct ViewRays<'a> {
    frustum: &'a ViewFrustum,
    origin: Vec3,
    rotation: Quat,
    next: usize,
}

impl<'a> ViewRays<'a> {
    #[inline]
    pub fn width(&self) -> usize {
        self.frustum.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.frustum.height
    }

    /// Ray through a pixel, independent of iteration state
    #[inline]
    pub fn ray_at(&self, col: usize, row: usize) -> Ray {
        Ray::new(
            self.origin,
            self.rotation * self.frustum.camera_direction(col, row),
        )
    }
}

impl<'a> Iterator for ViewRays<'a> {
    type Item = Ray;

    fn next(&mut self) -> Option<Self::Item> {
        let width = self.frustum.width;
        if self.next >= self.frustum.directions.len() {
            return None;
        }
        let ray = self.ray_at(self.next % width, self.next / width);
        self.next += 1;
        Some(ray)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frustum.directions.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for ViewRays<'a> {}
