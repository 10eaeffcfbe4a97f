pub mod axis;
pub mod base_pivot;
pub mod bounds;

pub use axis::{host_to_renderer, renderer_to_host, AXIS_CONVERSION, AXIS_CONVERSION_INV};
pub use base_pivot::{
    base_pivot_to_matrix, inverse_basis_or_identity, inverse_or_identity, matrix_to_base_pivot,
    Base, BasePivot, Frame, Pivot, TransformError,
};
pub use bounds::AABB;
