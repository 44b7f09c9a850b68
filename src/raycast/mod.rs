/// Ray casting against the voxel world
/// One DDA walk per screen cell; the first solid cell wins
pub mod dda;

pub use dda::{DdaStep, DdaWalk};

use crate::config::RaycastConfig;
use crate::perf::FrameStats;
use crate::player::{Player, ViewRays};
use crate::voxel::{Face, Material};
use crate::world::World;
use glam::{IVec3, Vec3};
use rayon::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length, or zero for a degenerate ray
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Result of a ray that hit a solid cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub cell: IVec3,
    pub material: Material,
    /// Distance travelled along the ray; 0 when the origin is inside the cell
    pub distance: f32,
    /// Intersection point on the entry face
    pub point: Vec3,
    /// None when the ray started inside the solid cell
    pub face: Option<Face>,
    /// Hit point lies near a boundary of the face
    pub is_edge: bool,
}

impl HitRecord {
    /// Glyph for this hit before any highlight is applied
    #[inline]
    pub fn glyph(&self, edge_glyph: char) -> char {
        if self.is_edge {
            edge_glyph
        } else {
            self.material.glyph()
        }
    }
}

pub struct Raycaster {
    max_range: f32,
    edge_threshold: f32,
    parallel: bool,
}

impl Raycaster {
    pub fn new(config: &RaycastConfig) -> Self {
        Self {
            max_range: config.max_range,
            edge_threshold: config.edge_threshold,
            parallel: false,
        }
    }

    /// Cast frame rows on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// First solid cell along `ray`, or None within max range
    pub fn cast(&self, ray: &Ray, world: &World) -> Option<HitRecord> {
        DdaWalk::new(ray, world.extents(), self.max_range)
            .find_map(|step| {
                world
                    .material_at(step.cell.x, step.cell.y, step.cell.z)
                    .map(|material| (step, material))
            })
            .map(|(step, material)| {
                let point = ray.at(step.distance);
                HitRecord {
                    cell: step.cell,
                    material,
                    distance: step.distance,
                    point,
                    face: step.entry_face,
                    is_edge: self.is_edge(point, step.cell, step.entry_face),
                }
            })
    }

    /// Hit point within `edge_threshold` of 0 or 1 on either in-face axis.
    fn is_edge(&self, point: Vec3, cell: IVec3, face: Option<Face>) -> bool {
        let Some(face) = face else {
            return false;
        };
        let axis = face.axis();
        [(axis + 1) % 3, (axis + 2) % 3].into_iter().any(|in_face| {
            let fraction = (point[in_face] - cell[in_face] as f32).clamp(0.0, 1.0);
            fraction < self.edge_threshold || fraction > 1.0 - self.edge_threshold
        })
    }

    /// The cell under the crosshair: cast along the exact forward direction.
    pub fn target(&self, player: &Player, world: &World) -> Option<HitRecord> {
        self.cast(&Ray::new(player.position(), player.forward()), world)
    }

    /// Cast every pixel of a view. All rays see the same world snapshot.
    pub fn cast_frame(&self, rays: &ViewRays<'_>, world: &World) -> HitGrid {
        crate::perf_scope!("cast_frame");
        let width = rays.width();
        let height = rays.height();
        let mut hits = vec![None; width * height];

        if self.parallel {
            hits.par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| self.cast_row(rays, world, row, out));
        } else {
            hits.chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| self.cast_row(rays, world, row, out));
        }

        HitGrid {
            width,
            height,
            hits,
        }
    }

    #[inline]
    fn cast_row(&self, rays: &ViewRays<'_>, world: &World, row: usize, out: &mut [Option<HitRecord>]) {
        for (col, slot) in out.iter_mut().enumerate() {
            *slot = self.cast(&rays.ray_at(col, row), world);
        }
    }

    /// Cast a frame and record hit counts into `stats`.
    pub fn cast_frame_with_stats(
        &self,
        rays: &ViewRays<'_>,
        world: &World,
        stats: &mut FrameStats,
    ) -> HitGrid {
        let timer = crate::perf::PerfTimer::silent();
        let grid = self.cast_frame(rays, world);
        stats.record_cast(grid.len(), grid.hit_count(), timer.elapsed());
        grid
    }
}

/// Row-major per-pixel hit records for one frame
#[derive(Clone, Debug, PartialEq)]
pub struct HitGrid {
    width: usize,
    height: usize,
    hits: Vec<Option<HitRecord>>,
}

impl HitGrid {
    /// Build a grid from row-major records; None if the length is wrong
    pub fn from_records(width: usize, height: usize, hits: Vec<Option<HitRecord>>) -> Option<Self> {
        (hits.len() == width * height).then_some(Self {
            width,
            height,
            hits,
        })
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
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Option<&HitRecord> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.hits[row * self.width + col].as_ref()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<HitRecord>]> {
        self.hits.chunks(self.width.max(1))
    }

    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|hit| hit.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec3;

    fn single_block_world(cell: IVec3) -> World {
        let mut world = World::new(UVec3::new(8, 8, 8)).unwrap();
        world.place(cell.x, cell.y, cell.z, Material::Stone);
        world
    }

    #[test]
    fn embedded_camera_hits_at_zero() {
        let world = single_block_world(IVec3::new(2, 2, 2));
        let raycaster = Raycaster::new(&RaycastConfig::default());
        let hit = raycaster
            .cast(&Ray::new(Vec3::new(2.5, 2.5, 2.5), Vec3::X), &world)
            .expect("camera inside a block hits");
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.cell, IVec3::new(2, 2, 2));
        assert_eq!(hit.face, None);
        assert!(!hit.is_edge);
    }

    #[test]
    fn corner_hit_is_edge() {
        let world = single_block_world(IVec3::new(4, 4, 0));
        let raycaster = Raycaster::new(&RaycastConfig::default());
        let hit = raycaster
            .cast(&Ray::new(Vec3::new(4.01, 4.99, 3.0), Vec3::NEG_Z), &world)
            .unwrap();
        assert_eq!(hit.face, Some(Face::PosZ));
        assert!(hit.is_edge);
        assert_eq!(hit.glyph('-'), '-');
    }

    #[test]
    fn hit_grid_rejects_wrong_length() {
        assert!(HitGrid::from_records(3, 2, vec![None; 5]).is_none());
        let grid = HitGrid::from_records(3, 2, vec![None; 6]).unwrap();
        assert_eq!(grid.rows().count(), 2);
        assert!(grid.get(3, 0).is_none());
    }
}
