use glam::{Vec2, Vec3};

use crate::constants::CLICK_DRAG_THRESHOLD_PX;
use crate::scene::Aabb;

/// Pointer press bookkeeping used to tell clicks from orbit drags.
#[derive(Default, Clone, Copy)]
pub struct PressState {
    pub down: bool,
    pub start: Vec2,
    pub last: Vec2,
    pub travelled: f32,
}

impl PressState {
    pub fn press(&mut self, pos: Vec2) {
        self.down = true;
        self.start = pos;
        self.last = pos;
        self.travelled = 0.0;
    }

    /// Records a move and returns the delta since the previous position.
    pub fn move_to(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        if self.down {
            self.travelled += delta.length();
        }
        delta
    }

    pub fn release(&mut self) {
        self.down = false;
    }

    /// True when the last press travelled far enough to count as a drag.
    #[inline]
    pub fn was_drag(&self) -> bool {
        self.travelled > CLICK_DRAG_THRESHOLD_PX
    }
}

/// Pointer position in CSS pixels relative to the viewport it was measured in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Normalized device coordinates for a pointer, or `None` for an empty viewport.
#[inline]
pub fn pointer_to_ndc(p: &PointerInput) -> Option<Vec2> {
    if p.width <= 0.0 || p.height <= 0.0 {
        return None;
    }
    let ndc_x = (p.x / p.width) * 2.0 - 1.0;
    let ndc_y = -(p.y / p.height) * 2.0 + 1.0;
    Some(Vec2::new(ndc_x, ndc_y))
}

/// Slab test. Returns the entry distance (or exit distance when the origin is
/// inside the box).
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, aabb: &Aabb) -> Option<f32> {
    let inv = ray_dir.recip();
    let t0 = (aabb.min - ray_origin) * inv;
    let t1 = (aabb.max - ray_origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_near <= t_far && t_far >= 0.0 {
        Some(if t_near >= 0.0 { t_near } else { t_far })
    } else {
        None
    }
}

/// Möller–Trumbore, double sided. Returns the ray parameter of the hit.
pub fn ray_triangle(ray_origin: Vec3, ray_dir: Vec3, tri: &[Vec3; 3]) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = ray_dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray_origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

// ---------------- DOM pointer helpers ----------------
#[cfg(target_arch = "wasm32")]
#[inline]
pub fn pointer_in_canvas(ev: &web_sys::MouseEvent, canvas: &web_sys::HtmlCanvasElement) -> PointerInput {
    let rect = canvas.get_bounding_client_rect();
    PointerInput {
        x: ev.client_x() as f32 - rect.left() as f32,
        y: ev.client_y() as f32 - rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}
