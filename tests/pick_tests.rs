// Host-side tests for pointer picking.

use glam::Vec3;
use room_viewer::camera::{screen_to_world_ray, CameraPose};
use room_viewer::input::PointerInput;
use room_viewer::pick::*;
use room_viewer::placeholder::box_mesh;
use room_viewer::scene::{Material, SceneGraph, SceneTags, TagRegistry, Transform};

const CENTER: PointerInput = PointerInput {
    x: 400.0,
    y: 300.0,
    width: 800.0,
    height: 600.0,
};

#[test]
fn center_ray_points_at_target() {
    let pose = CameraPose::default();
    let (ro, rd) = screen_to_world_ray(&pose, glam::Vec2::ZERO, 4.0 / 3.0);
    assert_eq!(ro, pose.position);
    let expected = (pose.target - pose.position).normalize();
    assert!(rd.distance(expected) < 1e-4);
}

#[test]
fn nearest_mesh_wins() {
    let mut scene = SceneGraph::new();
    let far = scene.add_mesh(None, "far", Transform::default(), box_mesh(1.0, 1.0, 1.0), Material::default());
    // On the center ray, a third of the way from the target to the camera
    let near = scene.add_mesh(
        None,
        "near",
        Transform::from_translation(Vec3::new(0.0, 1.6 / 3.0, 1.0)),
        box_mesh(0.4, 0.4, 0.4),
        Material::default(),
    );
    let mut reg = TagRegistry::new();
    reg.register(far, SceneTags::named("far"));
    reg.register(near, SceneTags::named("near"));

    let hit = resolve(&CENTER, &CameraPose::default(), &scene, scene.roots(), &reg).unwrap();
    assert_eq!(hit.node, near);
    assert_eq!(
        hit.class,
        HitClass::Generic {
            display_name: "near".into()
        }
    );
    assert!(hit.distance > 0.0);
    assert!((hit.point - CameraPose::default().position).length() - hit.distance < 1e-4);
}

#[test]
fn hidden_from_roots_is_not_picked() {
    let mut scene = SceneGraph::new();
    let only = scene.add_mesh(None, "box", Transform::default(), box_mesh(1.0, 1.0, 1.0), Material::default());
    let reg = TagRegistry::new();
    assert!(resolve(&CENTER, &CameraPose::default(), &scene, &[], &reg).is_none());
    let hit = resolve(&CENTER, &CameraPose::default(), &scene, &[only], &reg).unwrap();
    assert_eq!(hit.class, HitClass::Unclassified);
}

#[test]
fn scaled_parent_reports_world_distance() {
    let mut scene = SceneGraph::new();
    let root = scene.add_group(None, "root", Transform::default().with_scale(0.5));
    let child = scene.add_mesh(Some(root), "box", Transform::default(), box_mesh(2.0, 2.0, 2.0), Material::default());
    let pose = CameraPose {
        position: Vec3::new(0.1, 0.2, 5.0),
        target: Vec3::new(0.1, 0.2, 0.0),
        fov_deg: 75.0,
    };
    let hit = resolve(&CENTER, &pose, &scene, scene.roots(), &TagRegistry::new()).unwrap();
    assert_eq!(hit.node, child);
    // World-space box spans [-0.5, 0.5]
    assert!((hit.distance - 4.5).abs() < 1e-4);
}

#[test]
fn classify_priority() {
    let mut scene = SceneGraph::new();
    let id = scene.add_group(None, "n", Transform::default());
    let mut reg = TagRegistry::new();
    assert_eq!(classify(id, &reg), HitClass::Unclassified);

    reg.register(id, SceneTags::named("Lamp"));
    assert_eq!(
        classify(id, &reg),
        HitClass::Generic {
            display_name: "Lamp".into()
        }
    );
    reg.tags_mut(id).unwrap().marker = true;
    assert_eq!(classify(id, &reg), HitClass::Marker);
    reg.tags_mut(id).unwrap().focus_target = true;
    assert_eq!(classify(id, &reg), HitClass::FocusTarget);
}

#[test]
fn empty_viewport_has_no_hit() {
    let mut scene = SceneGraph::new();
    scene.add_mesh(None, "box", Transform::default(), box_mesh(1.0, 1.0, 1.0), Material::default());
    let p = PointerInput {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };
    assert!(resolve(&p, &CameraPose::default(), &scene, scene.roots(), &TagRegistry::new()).is_none());
}
