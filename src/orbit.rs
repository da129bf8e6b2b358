use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::camera::CameraPose;
use crate::constants::{
    ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR, ORBIT_MIN_DISTANCE, ORBIT_MIN_POLAR,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_STEP,
};

const POLAR_EPS: f32 = 1e-6;

/// Damped orbit controls around `CameraPose::target`.
///
/// Input accumulates into spherical deltas; `update` applies them to the pose.
/// The spherical state is re-derived from the pose on every update, so any
/// other writer of the pose (the focus tween) is picked up seamlessly.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    enabled: bool,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub rotate_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            damping: ORBIT_DAMPING,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling also drops any inertia still pending.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.scale = 1.0;
        }
    }

    /// Drag rotation; a full viewport height of travel is one full turn.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h * self.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Wheel zoom: positive `delta_y` (scroll down) moves away.
    pub fn zoom(&mut self, delta_y: f32) {
        if !self.enabled {
            return;
        }
        if delta_y > 0.0 {
            self.scale /= ORBIT_ZOOM_STEP;
        } else if delta_y < 0.0 {
            self.scale *= ORBIT_ZOOM_STEP;
        }
    }

    /// Applies pending input to `pose.position`. No-op while disabled.
    pub fn update(&mut self, pose: &mut CameraPose) {
        if !self.enabled {
            return;
        }
        let mut offset = pose.position - pose.target;
        let mut radius = offset.length();
        if radius < POLAR_EPS {
            offset = Vec3::Z * self.min_distance;
            radius = self.min_distance;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let f = if self.damping > 0.0 { self.damping } else { 1.0 };
        theta += self.delta_theta * f;
        phi += self.delta_phi * f;
        phi = phi
            .clamp(self.min_polar, self.max_polar)
            .clamp(POLAR_EPS, PI - POLAR_EPS);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        pose.position = pose.target + offset;

        if self.damping > 0.0 {
            self.delta_theta *= 1.0 - self.damping;
            self.delta_phi *= 1.0 - self.damping;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
    }
}
