/// Cell faces, named by the outward normal they face
use glam::IVec3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

const FACE_NORMALS: [IVec3; 6] = [
    IVec3::X,
    IVec3::NEG_X,
    IVec3::Y,
    IVec3::NEG_Y,
    IVec3::Z,
    IVec3::NEG_Z,
];

impl Face {
    #[inline]
    pub const fn normal(self) -> IVec3 {
        FACE_NORMALS[self as usize]
    }

    /// 0 = x, 1 = y, 2 = z
    #[inline]
    pub const fn axis(self) -> usize {
        self as usize / 2
    }

    /// Face through which a ray stepping `step` (±1) along `axis` enters a cell.
    #[inline]
    pub const fn entered_along(axis: usize, step: i32) -> Self {
        match (axis, step > 0) {
            (0, true) => Face::NegX,
            (0, false) => Face::PosX,
            (1, true) => Face::NegY,
            (1, false) => Face::PosY,
            (_, true) => Face::NegZ,
            (_, false) => Face::PosZ,
        }
    }
}
