use glam::{Mat3, Mat4, Vec3, Vec4};
use thiserror::Error;

/// Below this magnitude an axis or determinant is treated as zero.
pub const DEGENERATE_EPSILON: f32 = 1e-8;

/// One of the renderer's coordinate frames: an origin plus three axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Vec3,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
    pub z_axis: Vec3,
}

/// World placement. Axes are conventionally unit length.
pub type Base = Frame;

/// Local orientation and scale, applied before [`Base`].
pub type Pivot = Frame;

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    pub const IDENTITY: Frame = Frame {
        origin: Vec3::ZERO,
        x_axis: Vec3::X,
        y_axis: Vec3::Y,
        z_axis: Vec3::Z,
    };

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self {
            origin: matrix.w_axis.truncate(),
            x_axis: matrix.x_axis.truncate(),
            y_axis: matrix.y_axis.truncate(),
            z_axis: matrix.z_axis.truncate(),
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_cols(
            self.x_axis.extend(0.0),
            self.y_axis.extend(0.0),
            self.z_axis.extend(0.0),
            self.origin.extend(1.0),
        )
    }

    /// Per-axis magnitudes. Used as a scale proxy when the renderer stores
    /// scale on the base instead of the pivot.
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.x_axis.length(),
            self.y_axis.length(),
            self.z_axis.length(),
        )
    }

    pub fn has_unit_axes(&self) -> bool {
        (self.scale() - Vec3::ONE).abs().max_element() < 1e-4
    }

    /// Replaces zero-length axes with the canonical unit axis, so that a
    /// degenerate base carries a scale of 1 on that axis.
    fn without_degenerate_axes(&self) -> Frame {
        let fix = |axis: Vec3, canonical: Vec3| {
            if axis.length_squared() <= DEGENERATE_EPSILON {
                canonical
            } else {
                axis
            }
        };

        Frame {
            origin: self.origin,
            x_axis: fix(self.x_axis, Vec3::X),
            y_axis: fix(self.y_axis, Vec3::Y),
            z_axis: fix(self.z_axis, Vec3::Z),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BasePivot {
    pub base: Base,
    pub pivot: Pivot,
}

/// Splits a world matrix (already in renderer space) into base and pivot.
///
/// The base carries the translation with identity axes; the pivot carries
/// rotation and scale around a zero origin.
pub fn matrix_to_base_pivot(matrix: Mat4) -> BasePivot {
    let base = Base {
        origin: matrix.w_axis.truncate(),
        ..Base::IDENTITY
    };
    let pivot = Pivot {
        origin: Vec3::ZERO,
        ..Pivot::from_matrix(matrix)
    };

    BasePivot { base, pivot }
}

/// Composes base and pivot back into a single world matrix (renderer space).
pub fn base_pivot_to_matrix(base_pivot: &BasePivot) -> Mat4 {
    let base = if base_pivot.base.has_unit_axes() {
        base_pivot.base
    } else {
        log::trace!("Base axes are not unit length: {:?}", base_pivot.base.scale());
        base_pivot.base.without_degenerate_axes()
    };

    base.to_matrix() * base_pivot.pivot.to_matrix()
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    #[error("matrix is singular (determinant {0})")]
    Singular(f32),
}

pub fn try_inverse(matrix: Mat4) -> Result<Mat4, TransformError> {
    let det = matrix.determinant();
    if !det.is_finite() || det.abs() <= DEGENERATE_EPSILON {
        return Err(TransformError::Singular(det));
    }

    Ok(matrix.inverse())
}

pub fn try_inverse_basis(basis: Mat3) -> Result<Mat3, TransformError> {
    let det = basis.determinant();
    if !det.is_finite() || det.abs() <= DEGENERATE_EPSILON {
        return Err(TransformError::Singular(det));
    }

    Ok(basis.inverse())
}

pub fn inverse_or_identity(matrix: Mat4) -> Mat4 {
    try_inverse(matrix).unwrap_or_else(|err| {
        log::warn!("Cannot invert {:?}: {}; using identity", matrix, err);
        Mat4::IDENTITY
    })
}

pub fn inverse_basis_or_identity(basis: Mat3) -> Mat3 {
    try_inverse_basis(basis).unwrap_or_else(|err| {
        log::warn!("Cannot invert basis {:?}: {}; using identity", basis, err);
        Mat3::IDENTITY
    })
}

/// `world * inverse(reference)`: the transform that, applied to geometry
/// already baked with `reference`, reproduces `world`.
pub fn relative_to(world: Mat4, reference: Mat4) -> Mat4 {
    world * inverse_or_identity(reference)
}

/// Replaces the 3x3 part of `matrix`, keeping its translation.
pub fn with_basis(basis: Mat3, translation: Vec3) -> Mat4 {
    let mut matrix = Mat4::from_mat3(basis);
    matrix.w_axis = Vec4::new(translation.x, translation.y, translation.z, 1.0);
    matrix
}
