//! Eased camera transition toward a clicked target (position, look-at and
//! field of view interpolated together, giving a dolly-zoom feel).

use glam::Vec3;

use crate::camera::CameraPose;
use crate::constants::{
    FALLBACK_APPROACH_DIR, FOCUS_DURATION_MS, FOCUS_FOV_DEG, FOCUS_LIFT, FOCUS_STANDOFF,
};

/// Cubic ease-in-out on `[0, 1]`.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenParams {
    pub standoff: f32,
    pub lift: f32,
    pub end_fov_deg: f32,
    pub duration_ms: f64,
}

impl Default for TweenParams {
    fn default() -> Self {
        Self {
            standoff: FOCUS_STANDOFF,
            lift: FOCUS_LIFT,
            end_fov_deg: FOCUS_FOV_DEG,
            duration_ms: FOCUS_DURATION_MS,
        }
    }
}

/// One focus transition. Not reusable: every focus click builds a new one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTween {
    pub start: CameraPose,
    pub end: CameraPose,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl CameraTween {
    pub fn begin(current: &CameraPose, target: Vec3, now_ms: f64, params: &TweenParams) -> Self {
        let dir = (current.position - target)
            .try_normalize()
            .unwrap_or_else(|| {
                log::debug!("[tween] camera sits on target, using fallback approach");
                FALLBACK_APPROACH_DIR
            });
        let end_position = target + dir * params.standoff + Vec3::Y * params.lift;
        Self {
            start: *current,
            end: CameraPose {
                position: end_position,
                target,
                fov_deg: params.end_fov_deg,
            },
            start_ms: now_ms,
            duration_ms: params.duration_ms,
        }
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Pose at `now_ms` and whether the transition has finished.
    pub fn advance(&self, now_ms: f64) -> (CameraPose, bool) {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return (self.end, true);
        }
        let e = ease_in_out_cubic(progress);
        let pose = CameraPose {
            position: self.start.position.lerp(self.end.position, e),
            target: self.start.target.lerp(self.end.target, e),
            fov_deg: self.start.fov_deg * (1.0 - e) + self.end.fov_deg * e,
        };
        (pose, false)
    }
}
