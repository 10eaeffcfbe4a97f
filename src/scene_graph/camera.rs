/// Lens and sensor parameters of a host camera. Lengths are millimeters,
/// shifts are fractions of the larger sensor dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraData {
    pub lens: f32,
    pub sensor_width: f32,
    pub sensor_height: f32,
    pub shift_x: f32,
    pub shift_y: f32,
    pub clip_start: f32,
    pub clip_end: f32,
    /// Depth-of-field aperture, when the host's active renderer exposes one.
    pub aperture_fstop: Option<f32>,
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            lens: 50.0,
            sensor_width: 36.0,
            sensor_height: 24.0,
            shift_x: 0.0,
            shift_y: 0.0,
            clip_start: 0.1,
            clip_end: 100.0,
            aperture_fstop: None,
        }
    }
}

impl CameraData {
    /// Horizontal field of view in radians.
    pub fn angle(&self) -> f32 {
        2.0 * (self.sensor_width / (2.0 * self.lens)).atan()
    }
}
