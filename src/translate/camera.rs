use glam::{Mat4, Quat, Vec3};

use crate::math::axis::{point_to_host, vector_to_host};
use crate::math::host_to_renderer;
use crate::mxs::{CameraStep, MxsCamera};
use crate::scene_graph::{CameraData, RenderSettings};

/// f-stop written when the host camera has no depth-of-field setting.
pub const DEFAULT_FSTOP: f32 = 5.6;

/// Lens shift in the renderer is percent of the film; the host stores a
/// fraction, with Y flipped.
const SHIFT_SCALE_X: f32 = 200.0;
const SHIFT_SCALE_Y: f32 = -200.0;

const MM_PER_METER: f32 = 1000.0;

pub fn export_camera(
    name: &str,
    camera: &CameraData,
    world: Mat4,
    render: &RenderSettings,
) -> MxsCamera {
    let matrix = host_to_renderer(world);
    let origin = matrix.w_axis.truncate();
    let focal_point = origin - matrix.z_axis.truncate().normalize_or_zero();
    let up = matrix.y_axis.truncate().normalize_or_zero();

    let mut exported = MxsCamera::new(name);
    exported.set_step(
        0,
        CameraStep {
            origin,
            focal_point,
            up,
            focal_length: camera.lens / MM_PER_METER,
            f_stop: camera.aperture_fstop.unwrap_or(DEFAULT_FSTOP),
            step_time: 0.0,
        },
    );

    exported.film_width = camera.sensor_width / MM_PER_METER;
    exported.film_height = camera.sensor_height / MM_PER_METER;
    exported.angle = camera.angle().to_degrees();
    exported.resolution = render.effective_resolution();
    exported.shift_lens = (camera.shift_x * SHIFT_SCALE_X, camera.shift_y * SHIFT_SCALE_Y);

    exported
}

/// A host camera rebuilt from a renderer camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedCamera {
    pub name: String,
    pub data: CameraData,
    /// World transform in host space.
    pub matrix: Mat4,
}

/// Orientation that makes a camera (looking down -Z with +Y up) look along
/// `direction` with its up vector as close to `up` as possible.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Quat {
    let direction = direction.normalize_or(Vec3::NEG_Z);
    let aim = Quat::from_rotation_arc(Vec3::NEG_Z, direction);

    // Roll about the view direction by the signed angle between the up
    // vector `aim` produces and the requested one.
    let aimed_up = aim * Vec3::Y;
    let up = up.normalize_or_zero();
    let roll = direction
        .dot(aimed_up.cross(up))
        .atan2(aimed_up.dot(up));

    Quat::from_axis_angle(direction, roll) * aim
}

pub fn import_camera(camera: &MxsCamera, far_plane: f32) -> anyhow::Result<ImportedCamera> {
    let Some(step) = camera.step(0) else {
        anyhow::bail!("Camera {} has no steps", camera.name);
    };

    let origin = point_to_host(step.origin);
    let direction = point_to_host(step.focal_point) - origin;
    let up = vector_to_host(step.up);
    let rotation = look_rotation(direction, up);

    let data = CameraData {
        lens: step.focal_length * MM_PER_METER,
        sensor_width: camera.film_width * MM_PER_METER,
        sensor_height: camera.film_height * MM_PER_METER,
        shift_x: camera.shift_lens.0 / SHIFT_SCALE_X,
        shift_y: camera.shift_lens.1 / SHIFT_SCALE_Y,
        clip_end: far_plane,
        aperture_fstop: Some(step.f_stop),
        ..CameraData::default()
    };

    Ok(ImportedCamera {
        name: camera.name.clone(),
        data,
        matrix: Mat4::from_rotation_translation(rotation, origin),
    })
}
