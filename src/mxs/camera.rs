use glam::Vec3;

/// Camera pose and lens at one motion step. Distances in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraStep {
    pub origin: Vec3,
    pub focal_point: Vec3,
    pub up: Vec3,
    pub focal_length: f32,
    pub f_stop: f32,
    pub step_time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diaphragm {
    #[default]
    Circular,
    Polygonal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MxsCamera {
    pub name: String,
    pub steps: Vec<CameraStep>,
    pub shutter: f32,
    pub film_width: f32,
    pub film_height: f32,
    pub iso: f32,
    pub diaphragm: Diaphragm,
    /// Diaphragm angle in degrees. Exported cameras carry their horizontal
    /// field of view here.
    pub angle: f32,
    pub blades: u32,
    pub fps: f32,
    pub resolution: (u32, u32),
    pub pixel_aspect: f32,
    /// Lens shift in percent of the film size.
    pub shift_lens: (f32, f32),
}

impl MxsCamera {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            shutter: 1.0 / 100.0,
            film_width: 0.036,
            film_height: 0.024,
            iso: 100.0,
            diaphragm: Diaphragm::Circular,
            angle: 0.0,
            blades: 8,
            fps: 24.0,
            resolution: (1920, 1080),
            pixel_aspect: 1.0,
            shift_lens: (0.0, 0.0),
        }
    }

    pub fn step(&self, index: usize) -> Option<&CameraStep> {
        self.steps.get(index)
    }

    pub fn set_step(&mut self, index: usize, step: CameraStep) {
        if index < self.steps.len() {
            self.steps[index] = step;
        } else {
            self.steps.resize(index, step);
            self.steps.push(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_step_grows_steps() {
        let step = CameraStep {
            origin: Vec3::ZERO,
            focal_point: Vec3::NEG_Z,
            up: Vec3::Y,
            focal_length: 0.05,
            f_stop: 5.6,
            step_time: 0.0,
        };
        let mut camera = MxsCamera::new("cam");
        assert!(camera.step(0).is_none());
        camera.set_step(0, step);
        assert_eq!(camera.step(0), Some(&step));
    }
}
