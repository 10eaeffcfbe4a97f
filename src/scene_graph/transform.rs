use glam::{Mat3, Mat4, Quat, Vec3};

/// Local transform of a host object relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    local_matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        local_matrix: Mat4::IDENTITY,
    };

    pub fn from_matrix(local_matrix: Mat4) -> Self {
        Self { local_matrix }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_matrix(Mat4::from_translation(translation))
    }

    pub fn from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        Self::from_matrix(Mat4::from_scale_rotation_translation(
            scale,
            rotation,
            translation,
        ))
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.local_matrix
    }

    pub fn translation(&self) -> Vec3 {
        self.local_matrix.w_axis.truncate()
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.local_matrix.w_axis = translation.extend(1.0);
    }

    /// Rotation and scale part.
    pub fn basis(&self) -> Mat3 {
        Mat3::from_mat4(self.local_matrix)
    }

    pub fn set_basis(&mut self, basis: Mat3) {
        let translation = self.translation();
        self.local_matrix = Mat4::from_mat3(basis);
        self.set_translation(translation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_basis_keeps_translation() {
        let mut transform = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        transform.set_basis(Mat3::from_diagonal(Vec3::splat(2.0)));

        assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.basis(), Mat3::from_diagonal(Vec3::splat(2.0)));
    }
}
