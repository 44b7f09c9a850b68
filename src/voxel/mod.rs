/// Core voxel cell types
pub mod face;
pub mod material;

pub use face::Face;
pub use material::Material;

/// One voxel: empty, or solid with a material
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Solid(Material),
}

impl Cell {
    #[inline]
    pub const fn is_solid(self) -> bool {
        matches!(self, Cell::Solid(_))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn material(self) -> Option<Material> {
        match self {
            Cell::Solid(material) => Some(material),
            Cell::Empty => None,
        }
    }
}
