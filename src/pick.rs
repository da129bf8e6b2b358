//! Pointer picking: pointer -> ray -> nearest mesh -> classified hit.

use glam::Vec3;

use crate::camera::{screen_to_world_ray, CameraPose};
use crate::input::{pointer_to_ndc, ray_aabb, ray_triangle, PointerInput};
use crate::scene::{NodeId, SceneGraph, TagRegistry};

#[derive(Clone, Debug, PartialEq)]
pub enum HitClass {
    FocusTarget,
    Marker,
    Generic { display_name: String },
    Unclassified,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    /// World-space distance from the camera along the ray.
    pub distance: f32,
    pub point: Vec3,
    pub class: HitClass,
}

/// Nearest classified hit, or `None` when the ray meets nothing.
pub type PointerHit = Option<Hit>;

/// Casts a ray through `pointer` and returns the closest mesh hit among
/// every mesh reachable from `roots`.
pub fn resolve(
    pointer: &PointerInput,
    camera: &CameraPose,
    scene: &SceneGraph,
    roots: &[NodeId],
    registry: &TagRegistry,
) -> PointerHit {
    let ndc = pointer_to_ndc(pointer)?;
    let aspect = pointer.width / pointer.height;
    let (ro, rd) = screen_to_world_ray(camera, ndc, aspect);
    let (node, distance, point) = nearest_intersection(scene, roots, ro, rd)?;
    Some(Hit {
        node,
        distance,
        point,
        class: classify(node, registry),
    })
}

/// Priority: focus target, then marker, then any registered node.
pub fn classify(node: NodeId, registry: &TagRegistry) -> HitClass {
    match registry.tags(node) {
        Some(t) if t.focus_target => HitClass::FocusTarget,
        Some(t) if t.marker => HitClass::Marker,
        Some(t) => HitClass::Generic {
            display_name: t.display_name.clone(),
        },
        None => HitClass::Unclassified,
    }
}

/// Closest `(node, world distance, world point)` along the ray.
pub fn nearest_intersection(
    scene: &SceneGraph,
    roots: &[NodeId],
    ray_origin: Vec3,
    ray_dir: Vec3,
) -> Option<(NodeId, f32, Vec3)> {
    let mut best: Option<(NodeId, f32, Vec3)> = None;
    for id in scene.mesh_nodes(roots) {
        let Some(hit) = intersect_node(scene, id, ray_origin, ray_dir) else {
            continue;
        };
        match best {
            Some((_, bd, _)) if hit.0 >= bd => {}
            _ => best = Some((id, hit.0, hit.1)),
        }
    }
    best
}

fn intersect_node(
    scene: &SceneGraph,
    id: NodeId,
    ray_origin: Vec3,
    ray_dir: Vec3,
) -> Option<(f32, Vec3)> {
    let mesh = scene.get(id)?.mesh.as_ref()?;
    let world = scene.world_matrix(id);
    if world.determinant().abs() < f32::EPSILON {
        return None;
    }
    let inv = world.inverse();
    let lo = inv.transform_point3(ray_origin);
    // Not normalized: local t then maps back to the same world point.
    let ld = inv.transform_vector3(ray_dir);
    ray_aabb(lo, ld, &mesh.bounds)?;

    let t_local = mesh
        .triangles()
        .filter_map(|tri| ray_triangle(lo, ld, &tri))
        .fold(None, |acc: Option<f32>, t| Some(acc.map_or(t, |a| a.min(t))))?;
    let point = world.transform_point3(lo + ld * t_local);
    Some(((point - ray_origin).length(), point))
}
