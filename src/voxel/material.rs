/// Material enumeration
/// Using u8 representation so a cell stays one byte plus tag
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Material {
    Ground = 0,
    Stone = 1,
    Brick = 2,
    Wood = 3,
}

pub const MATERIAL_COUNT: usize = 4;

// Lookup table for glyphs - indexed by discriminant
const MATERIAL_GLYPH_LUT: [char; MATERIAL_COUNT] = [
    '@', // Ground
    '#', // Stone
    '%', // Brick
    '=', // Wood
];

impl Material {
    /// Glyph drawn for a face hit on this material
    #[inline]
    pub const fn glyph(self) -> char {
        MATERIAL_GLYPH_LUT[self as usize]
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Ground
    }
}
