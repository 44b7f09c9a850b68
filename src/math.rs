/// Vector helpers on top of glam
/// World space is Z-up: x and y span the ground plane, z is height
use glam::{IVec3, Quat, Vec3};
use std::f32::consts::TAU;

/// Unit direction for a yaw (around Z) and pitch (above the XY plane).
#[inline]
pub fn direction_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch)
}

/// Rotation taking camera space (forward = +X, right = +Y, up = +Z)
/// into world space for the given yaw and pitch.
#[inline]
pub fn view_rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_z(yaw) * Quat::from_rotation_y(-pitch)
}

/// Horizontal forward unit vector for a yaw.
#[inline]
pub fn horizontal_forward(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(cos_yaw, sin_yaw, 0.0)
}

/// Horizontal unit vector pointing to the right of `horizontal_forward(yaw)`
/// as seen on screen (increasing yaw turns the view right).
#[inline]
pub fn horizontal_right(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(-sin_yaw, cos_yaw, 0.0)
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Cell containing a world-space point.
#[inline]
pub fn cell_of(point: Vec3) -> IVec3 {
    point.floor().as_ivec3()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn angles_map_to_axes() {
        assert!(approx(direction_from_angles(0.0, 0.0), Vec3::X));
        assert!(approx(direction_from_angles(FRAC_PI_2, 0.0), Vec3::Y));
        assert!(approx(direction_from_angles(0.0, FRAC_PI_2), Vec3::Z));
    }

    #[test]
    fn view_rotation_matches_angle_direction() {
        for &(yaw, pitch) in &[(0.3, 0.2), (2.0, -0.7), (5.5, 1.2)] {
            let rotated = view_rotation(yaw, pitch) * Vec3::X;
            assert!(approx(rotated, direction_from_angles(yaw, pitch)));
        }
    }

    #[test]
    fn right_is_derivative_of_forward() {
        let yaw = 0.8;
        let ahead = horizontal_forward(yaw + 1e-3);
        let delta = (ahead - horizontal_forward(yaw)).normalize();
        assert!((delta - horizontal_right(yaw)).length() < 1e-2);
        assert!(approx(view_rotation(yaw, 0.0) * Vec3::Y, horizontal_right(yaw)));
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!(wrap_angle(-1e-9) < TAU);
    }

    #[test]
    fn cell_of_floors_negative_coordinates() {
        assert_eq!(cell_of(Vec3::new(-0.5, 0.5, 1.0)), IVec3::new(-1, 0, 1));
    }
}
