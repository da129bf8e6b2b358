//! Procedural geometry: the stand-in TV used when no model could be loaded,
//! and the floor.

use glam::{Quat, Vec3};

use crate::constants::{FLOOR_COLOR, FLOOR_SIZE, PLACEHOLDER_HEIGHT_OFFSET};
use crate::scene::{Material, MeshData, NodeId, SceneGraph, Transform};

const STAND_COLOR: [f32; 3] = [0.2, 0.2, 0.2]; // 0x333333
const BODY_COLOR: [f32; 3] = [0.133, 0.133, 0.133]; // 0x222222
const SCREEN_COLOR: [f32; 3] = [0.0, 0.467, 0.8]; // 0x0077cc
const MARKER_COLOR: [f32; 3] = [0.85, 0.25, 0.2];

/// Axis-aligned box centered at the origin.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    // (normal, four corners counter-clockwise seen from outside)
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::Z,
            [
                Vec3::new(-x, -y, z),
                Vec3::new(x, -y, z),
                Vec3::new(x, y, z),
                Vec3::new(-x, y, z),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(x, -y, -z),
                Vec3::new(-x, -y, -z),
                Vec3::new(-x, y, -z),
                Vec3::new(x, y, -z),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-x, -y, -z),
                Vec3::new(-x, -y, z),
                Vec3::new(-x, y, z),
                Vec3::new(-x, y, -z),
            ],
        ),
        (
            Vec3::X,
            [
                Vec3::new(x, -y, z),
                Vec3::new(x, -y, -z),
                Vec3::new(x, y, -z),
                Vec3::new(x, y, z),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-x, y, z),
                Vec3::new(x, y, z),
                Vec3::new(x, y, -z),
                Vec3::new(-x, y, -z),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-x, -y, -z),
                Vec3::new(x, -y, -z),
                Vec3::new(x, -y, z),
                Vec3::new(-x, -y, z),
            ],
        ),
    ];
    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = positions.len() as u32;
        positions.extend_from_slice(&corners);
        normals.extend_from_slice(&[normal; 4]);
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    MeshData::new(positions, normals, indices)
}

/// Plane in the XY plane facing +Z.
pub fn plane_mesh(width: f32, height: f32) -> MeshData {
    let (x, y) = (width * 0.5, height * 0.5);
    MeshData::new(
        vec![
            Vec3::new(-x, -y, 0.0),
            Vec3::new(x, -y, 0.0),
            Vec3::new(x, y, 0.0),
            Vec3::new(-x, y, 0.0),
        ],
        vec![Vec3::Z; 4],
        vec![0, 1, 2, 2, 3, 0],
    )
}

/// Stand, body, screen and a magazine marker, grouped under one root.
pub fn build_placeholder_tv(scene: &mut SceneGraph) -> NodeId {
    let h = PLACEHOLDER_HEIGHT_OFFSET;
    let root = scene.add_group(None, "TV placeholder", Transform::default());
    scene.add_mesh(
        Some(root),
        "TV stand",
        Transform::from_translation(Vec3::new(0.0, 0.06 + h, 0.0)),
        box_mesh(1.5, 0.12, 0.8),
        Material::lit("stand", STAND_COLOR),
    );
    scene.add_mesh(
        Some(root),
        "TV body",
        Transform::from_translation(Vec3::new(0.0, 0.5 + h, 0.0)),
        box_mesh(1.3, 0.8, 0.12),
        Material::lit("body", BODY_COLOR),
    );
    scene.add_mesh(
        Some(root),
        "TV screen",
        Transform::from_translation(Vec3::new(0.0, 0.5 + h, 0.07)),
        plane_mesh(1.2, 0.7),
        Material::unlit("screen", SCREEN_COLOR),
    );
    scene.add_mesh(
        Some(root),
        "Magazine marker",
        Transform::from_translation(Vec3::new(0.55, 0.14 + h, 0.25)),
        box_mesh(0.25, 0.04, 0.18),
        Material::lit("marker", MARKER_COLOR),
    );
    root
}

/// Floor plane at y = 0. Not registered as clickable.
pub fn build_floor(scene: &mut SceneGraph) -> NodeId {
    scene.add_mesh(
        None,
        "floor",
        Transform::default().with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
        plane_mesh(FLOOR_SIZE, FLOOR_SIZE),
        Material::lit("floor", FLOOR_COLOR),
    )
}
