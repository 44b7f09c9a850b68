/// Grid traversal (Amanatides & Woo DDA)
/// Visits every cell a ray passes through exactly once, in order, with O(1)
/// work per step independent of ray angle
use super::Ray;
use crate::math::cell_of;
use crate::voxel::Face;
use glam::{IVec3, Vec3};

/// One visited cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DdaStep {
    pub cell: IVec3,
    /// Distance along the ray at which the cell was entered
    pub distance: f32,
    /// Face the ray crossed to enter the cell; None for the origin cell
    pub entry_face: Option<Face>,
}

pub struct DdaWalk {
    cell: IVec3,
    step: IVec3,
    /// Distance along the ray to cross one full cell on each axis
    t_delta: Vec3,
    /// Distance along the ray to the next boundary on each axis
    t_max: Vec3,
    bounds: IVec3,
    max_range: f32,
    pending: Option<DdaStep>,
}

impl DdaWalk {
    /// Walk `ray` through a grid of `bounds` cells, up to `max_range`.
    /// Zero direction components never step and never divide by zero.
    pub fn new(ray: &Ray, bounds: IVec3, max_range: f32) -> Self {
        let origin = ray.origin;
        let direction = ray.direction;
        let cell = cell_of(origin);

        let mut step = IVec3::ZERO;
        let mut t_delta = Vec3::splat(f32::INFINITY);
        let mut t_max = Vec3::splat(f32::INFINITY);

        for axis in 0..3 {
            let d = direction[axis];
            if d == 0.0 {
                continue;
            }
            let delta = (1.0 / d).abs();
            let fraction = origin[axis] - origin[axis].floor();
            t_delta[axis] = delta;
            if d > 0.0 {
                step[axis] = 1;
                t_max[axis] = (1.0 - fraction) * delta;
            } else {
                step[axis] = -1;
                t_max[axis] = fraction * delta;
            }
        }

        let mut walk = Self {
            cell,
            step,
            t_delta,
            t_max,
            bounds,
            max_range,
            pending: None,
        };
        if !walk.escaping() {
            walk.pending = Some(DdaStep {
                cell,
                distance: 0.0,
                entry_face: None,
            });
        }
        walk
    }

    /// Outside the grid on some axis and not heading back in.
    #[inline]
    fn escaping(&self) -> bool {
        (0..3).any(|axis| {
            let c = self.cell[axis];
            let s = self.step[axis];
            (c < 0 && s <= 0) || (c >= self.bounds[axis] && s >= 0)
        })
    }

    #[inline]
    fn nearest_axis(&self) -> usize {
        let t = self.t_max;
        if t.x <= t.y && t.x <= t.z {
            0
        } else if t.y <= t.z {
            1
        } else {
            2
        }
    }

    fn advance(&mut self) -> Option<DdaStep> {
        let axis = self.nearest_axis();
        let distance = self.t_max[axis];
        if !(distance <= self.max_range) {
            return None;
        }

        self.cell[axis] += self.step[axis];
        self.t_max[axis] += self.t_delta[axis];

        if self.escaping() {
            return None;
        }

        Some(DdaStep {
            cell: self.cell,
            distance,
            entry_face: Some(Face::entered_along(axis, self.step[axis])),
        })
    }
}

impl Iterator for DdaWalk {
    type Item = DdaStep;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.pending.take()?;
        self.pending = self.advance();
        Some(current)
    }
}

impl std::iter::FusedIterator for DdaWalk {}
