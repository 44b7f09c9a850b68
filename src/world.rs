/// Dense voxel world
/// Fixed-size grid; out-of-bounds reads are empty and out-of-bounds writes are ignored
use crate::config::{Terrain, WorldConfig};
use crate::voxel::{Cell, Face, Material};
use glam::{IVec3, UVec3};
use noise::{NoiseFn, Perlin};

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("world extents must be non-zero, got {0}")]
    InvalidExtents(UVec3),

    #[error("world extents {0} exceed the addressable grid size")]
    TooLarge(UVec3),
}

/// Horizontal frequency of the hill heightmap
const HILL_SCALE: f64 = 0.15;

pub struct World {
    /// Grid size along x, y, z as signed ints for bounds checks
    extents: IVec3,
    /// Cells stored z-major: (z * SY + y) * SX + x
    cells: Vec<Cell>,
}

impl World {
    /// Create an empty world.
    pub fn new(extents: UVec3) -> Result<Self, WorldError> {
        if extents.min_element() == 0 {
            return Err(WorldError::InvalidExtents(extents));
        }
        if extents.max_element() > i32::MAX as u32 {
            return Err(WorldError::TooLarge(extents));
        }
        let volume = (extents.x as usize)
            .checked_mul(extents.y as usize)
            .and_then(|v| v.checked_mul(extents.z as usize))
            .ok_or(WorldError::TooLarge(extents))?;

        Ok(Self {
            extents: extents.as_ivec3(),
            cells: vec![Cell::Empty; volume],
        })
    }

    /// Create a world and generate its terrain.
    pub fn from_config(config: &WorldConfig) -> Result<Self, WorldError> {
        let mut world = Self::new(config.extents)?;
        match config.terrain {
            Terrain::Flat { ground_height } => {
                world.fill_layers(ground_height, Material::Ground);
            }
            Terrain::Hills {
                seed,
                base_height,
                amplitude,
            } => {
                world.generate_hills(seed, base_height, amplitude);
            }
        }
        log::info!(
            "[World] Generated {} world with {} solid cells",
            world.extents,
            world.solid_count()
        );
        Ok(world)
    }

    #[inline]
    pub fn extents(&self) -> IVec3 {
        self.extents
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && x < self.extents.x
            && y < self.extents.y
            && z < self.extents.z
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !self.contains(x, y, z) {
            return None;
        }
        let (sx, sy) = (self.extents.x as usize, self.extents.y as usize);
        Some((z as usize * sy + y as usize) * sx + x as usize)
    }

    /// Cell at the coordinate; Empty outside the grid
    #[inline]
    pub fn cell(&self, x: i32, y: i32, z: i32) -> Cell {
        match self.index(x, y, z) {
            Some(index) => self.cells[index],
            None => Cell::Empty,
        }
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.cell(x, y, z).is_solid()
    }

    #[inline]
    pub fn is_solid_at(&self, cell: IVec3) -> bool {
        self.is_solid(cell.x, cell.y, cell.z)
    }

    #[inline]
    pub fn material_at(&self, x: i32, y: i32, z: i32) -> Option<Material> {
        self.cell(x, y, z).material()
    }

    /// Mark an empty in-bounds cell solid. Returns false when nothing changed.
    pub fn place(&mut self, x: i32, y: i32, z: i32, material: Material) -> bool {
        let Some(index) = self.index(x, y, z) else {
            return false;
        };
        if self.cells[index].is_solid() {
            return false;
        }
        self.cells[index] = Cell::Solid(material);
        log::debug!("[World] Placed {:?} at ({}, {}, {})", material, x, y, z);
        true
    }

    /// Mark a solid in-bounds cell empty. Returns false when nothing changed.
    pub fn remove(&mut self, x: i32, y: i32, z: i32) -> bool {
        let Some(index) = self.index(x, y, z) else {
            return false;
        };
        if self.cells[index].is_empty() {
            return false;
        }
        self.cells[index] = Cell::Empty;
        log::debug!("[World] Removed block at ({}, {}, {})", x, y, z);
        true
    }

    /// Place a block in the neighbour of `cell` across `face`.
    /// Returns the placed coordinate, or None when the neighbour is
    /// outside the grid or occupied.
    pub fn place_against(&mut self, cell: IVec3, face: Face, material: Material) -> Option<IVec3> {
        let neighbour = cell + face.normal();
        self.place(neighbour.x, neighbour.y, neighbour.z, material)
            .then_some(neighbour)
    }

    /// Fill the bottom `layers` z-levels with `material`.
    pub fn fill_layers(&mut self, layers: u32, material: Material) {
        let top = (layers.min(self.extents.z as u32)) as i32;
        for z in 0..top {
            for y in 0..self.extents.y {
                for x in 0..self.extents.x {
                    if let Some(index) = self.index(x, y, z) {
                        self.cells[index] = Cell::Solid(material);
                    }
                }
            }
        }
    }

    /// Perlin heightmap: ground on top of each column, stone below.
    /// Column heights are clamped to [1, SZ].
    pub fn generate_hills(&mut self, seed: u32, base_height: u32, amplitude: f32) {
        let perlin = Perlin::new(seed);
        for y in 0..self.extents.y {
            for x in 0..self.extents.x {
                let height = Self::sample_column_height(&perlin, x, y, base_height, amplitude)
                    .clamp(1, self.extents.z);
                for z in 0..height {
                    let material = if z == height - 1 {
                        Material::Ground
                    } else {
                        Material::Stone
                    };
                    if let Some(index) = self.index(x, y, z) {
                        self.cells[index] = Cell::Solid(material);
                    }
                }
            }
        }
    }

    #[inline]
    fn sample_column_height(perlin: &Perlin, x: i32, y: i32, base: u32, amplitude: f32) -> i32 {
        let noise_value = perlin.get([x as f64 * HILL_SCALE, y as f64 * HILL_SCALE]);
        (base as f64 + noise_value * amplitude as f64).round() as i32
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_solid()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_solid(world: &World, x: i32, y: i32) -> Option<i32> {
        (0..world.extents().z).rev().find(|&z| world.is_solid(x, y, z))
    }

    fn small_world() -> World {
        World::new(UVec3::new(4, 5, 3)).unwrap()
    }

    #[test]
    fn zero_extent_fails_fast() {
        assert!(matches!(
            World::new(UVec3::new(4, 0, 3)),
            Err(WorldError::InvalidExtents(_))
        ));
    }

    #[test]
    fn index_layout_is_unique() {
        let world = small_world();
        let mut seen = vec![false; 4 * 5 * 3];
        for z in 0..3 {
            for y in 0..5 {
                for x in 0..4 {
                    let index = world.index(x, y, z).unwrap();
                    assert!(!seen[index]);
                    seen[index] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn flat_terrain_fills_bottom_layers() {
        let world = World::from_config(&WorldConfig::default()).unwrap();
        assert_eq!(world.solid_count(), 20 * 20 * 4);
        assert!(world.is_solid(0, 0, 3));
        assert!(!world.is_solid(0, 0, 4));
        assert_eq!(top_solid(&world, 7, 7), Some(3));
    }

    #[test]
    fn fill_layers_clamps_to_height() {
        let mut world = small_world();
        world.fill_layers(10, Material::Stone);
        assert_eq!(world.solid_count(), 4 * 5 * 3);
    }

    #[test]
    fn hills_give_every_column_a_surface() {
        let mut world = World::new(UVec3::new(16, 16, 8)).unwrap();
        world.generate_hills(42, 3, 3.0);
        for y in 0..16 {
            for x in 0..16 {
                let top = top_solid(&world, x, y).expect("column should have ground");
                assert_eq!(world.material_at(x, y, top), Some(Material::Ground));
                assert!(world.is_solid(x, y, 0));
            }
        }
    }

    #[test]
    fn place_against_uses_face_normal() {
        let mut world = small_world();
        assert!(world.place(1, 1, 0, Material::Stone));
        let placed = world.place_against(IVec3::new(1, 1, 0), Face::PosZ, Material::Brick);
        assert_eq!(placed, Some(IVec3::new(1, 1, 1)));
        assert_eq!(world.material_at(1, 1, 1), Some(Material::Brick));

        // Neighbour below the grid
        assert_eq!(
            world.place_against(IVec3::new(1, 1, 0), Face::NegZ, Material::Brick),
            None
        );
        // Neighbour already solid
        assert_eq!(
            world.place_against(IVec3::new(1, 1, 0), Face::PosZ, Material::Brick),
            None
        );
    }
}
