use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::constants::{
    CAMERA_FOV_DEG, CAMERA_START_POSITION, CAMERA_START_TARGET, CAMERA_ZFAR, CAMERA_ZNEAR,
};

/// Camera position, look-at target and vertical field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_deg: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: CAMERA_START_POSITION,
            target: CAMERA_START_TARGET,
            fov_deg: CAMERA_FOV_DEG,
        }
    }
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_deg.to_radians(),
            aspect.max(1e-4),
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        )
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// Compute a world-space ray through a point in normalized device coordinates.
///
/// - `ndc`: x and y in [-1, 1], y up
/// - `aspect`: viewport width / height
///
/// Returns `(ray_origin, ray_direction)` in world space; the direction is unit length.
#[inline]
pub fn screen_to_world_ray(pose: &CameraPose, ndc: Vec2, aspect: f32) -> (Vec3, Vec3) {
    let inv = pose.view_proj(aspect).inverse();
    let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = pose.position;
    let rd = (p1 - ro).normalize();
    (ro, rd)
}
