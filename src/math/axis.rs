use std::f32::consts::FRAC_PI_2;

use glam::{Mat3, Mat4, Vec3};

/// Maps the host's world space (forward -Z, up Y in view terms, Z-up world)
/// onto the renderer's (forward Y, up Z). Host `(x, y, z)` becomes
/// renderer `(x, z, -y)`.
pub const AXIS_CONVERSION: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, -1.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
]);

/// Inverse of [`AXIS_CONVERSION`]: renderer `(x, y, z)` becomes host `(x, -z, y)`.
pub const AXIS_CONVERSION_INV: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, -1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
]);

/// Same rotation as [`AXIS_CONVERSION`], built from its definition.
pub fn axis_conversion_rotation() -> Mat4 {
    Mat4::from_rotation_x(-FRAC_PI_2)
}

// The conversion is applied to world transforms and world-space vectors only.
// Mesh data stays in object space on both sides.

#[inline]
pub fn host_to_renderer(matrix: Mat4) -> Mat4 {
    AXIS_CONVERSION * matrix
}

#[inline]
pub fn renderer_to_host(matrix: Mat4) -> Mat4 {
    AXIS_CONVERSION_INV * matrix
}

#[inline]
pub fn point_to_renderer(point: Vec3) -> Vec3 {
    AXIS_CONVERSION.transform_point3(point)
}

#[inline]
pub fn point_to_host(point: Vec3) -> Vec3 {
    AXIS_CONVERSION_INV.transform_point3(point)
}

#[inline]
pub fn vector_to_host(vector: Vec3) -> Vec3 {
    Mat3::from_mat4(AXIS_CONVERSION_INV) * vector
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn constant_matches_rotation_about_x() {
        assert_abs_diff_eq!(AXIS_CONVERSION, axis_conversion_rotation(), epsilon = 1e-6);
    }

    #[test]
    fn constants_are_inverse() {
        assert_abs_diff_eq!(AXIS_CONVERSION * AXIS_CONVERSION_INV, Mat4::IDENTITY, epsilon = 1e-6);
    }

    #[test]
    fn host_up_becomes_renderer_up() {
        // Host Z-up lands on the renderer's Y axis.
        assert_abs_diff_eq!(point_to_renderer(Vec3::Z), Vec3::Y, epsilon = 1e-6);
        assert_abs_diff_eq!(point_to_renderer(Vec3::Y), Vec3::NEG_Z, epsilon = 1e-6);
        assert_abs_diff_eq!(
            point_to_host(Vec3::new(1.0, 2.0, 3.0)),
            Vec3::new(1.0, -3.0, 2.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn host_and_renderer_conversions_cancel() {
        let m = Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 2.0, 0.5),
            glam::Quat::from_rotation_z(0.3),
            Vec3::new(4.0, -1.0, 2.0),
        );
        assert_abs_diff_eq!(renderer_to_host(host_to_renderer(m)), m, epsilon = 1e-5);
    }
}
