//! Model loading and the fallback chain.
//!
//! Fetching is browser-only; everything that turns bytes into scene nodes is
//! plain Rust so each fallback path can be exercised on the host.

use glam::{Quat, Vec3};
use std::io::Cursor;

use crate::config::AssetUrls;
use crate::constants::{TV_DEFAULT_COLOR, TV_MODEL_SCALE};
use crate::error::ViewerError;
use crate::placeholder::build_placeholder_tv;
use crate::scene::{Material, MeshData, NodeId, SceneGraph, TagRegistry, Transform};
use crate::tagging::{tag_room, tag_tv};

/// Which step of the fallback chain produced the TV.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TvSource {
    Model,
    ModelWithoutMaterials,
    Placeholder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadedTv {
    pub root: NodeId,
    pub source: TvSource,
    pub focus: Option<NodeId>,
}

// ---------------- OBJ / MTL ----------------

fn obj_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Parses an OBJ (and optionally its MTL) into a new root subtree.
///
/// With `mtl == None`, or when the MTL fails to parse, every mesh gets the
/// default grey material and the returned flag is `false`.
pub fn insert_obj(
    scene: &mut SceneGraph,
    url: &str,
    obj: &[u8],
    mtl: Option<&[u8]>,
    transform: Transform,
) -> Result<(NodeId, bool), ViewerError> {
    let mut reader = Cursor::new(obj);
    let (models, materials) = match mtl {
        Some(mtl) => tobj::load_obj_buf(&mut reader, &obj_options(), |_| {
            tobj::load_mtl_buf(&mut Cursor::new(mtl))
        }),
        None => tobj::load_obj_buf(&mut reader, &obj_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        }),
    }
    .map_err(|e| ViewerError::parse(url, e))?;
    if models.is_empty() {
        return Err(ViewerError::parse(url, "no meshes"));
    }

    let materials = match (mtl, materials) {
        (Some(_), Ok(m)) => Some(m),
        (Some(_), Err(e)) => {
            log::warn!("[assets] {}: material library unusable ({}), using default", url, e);
            None
        }
        (None, _) => None,
    };
    let with_materials = materials.is_some();

    let root = scene.add_group(None, url, transform);
    for model in &models {
        let mesh = MeshData::from_flat(
            &model.mesh.positions,
            &model.mesh.normals,
            model.mesh.indices.clone(),
        );
        let material = match &materials {
            Some(mats) => model
                .mesh
                .material_id
                .and_then(|i| mats.get(i))
                .map(|m| Material::lit(&m.name, m.diffuse.unwrap_or([0.8, 0.8, 0.8])))
                .unwrap_or_default(),
            None => Material::lit("default", TV_DEFAULT_COLOR),
        };
        scene.add_mesh(Some(root), &model.name, Transform::default(), mesh, material);
    }
    Ok((root, with_materials))
}

// ---------------- glTF / GLB ----------------

/// Parses a glTF/GLB document (embedded or data-URI buffers) into a new root
/// subtree mirroring its node hierarchy.
pub fn insert_gltf(
    scene: &mut SceneGraph,
    url: &str,
    bytes: &[u8],
    transform: Transform,
) -> Result<NodeId, ViewerError> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| ViewerError::parse(url, e))?;
    let buffers = gltf::import_buffers(&gltf.document, None, gltf.blob.clone())
        .map_err(|e| ViewerError::parse(url, e))?;
    let doc_scene = gltf
        .document
        .default_scene()
        .or_else(|| gltf.document.scenes().next())
        .ok_or_else(|| ViewerError::parse(url, "no scene"))?;

    let root = scene.add_group(None, url, transform);
    for node in doc_scene.nodes() {
        insert_gltf_node(scene, root, &node, &buffers);
    }
    Ok(root)
}

fn insert_gltf_node(
    scene: &mut SceneGraph,
    parent: NodeId,
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
) {
    let (t, r, s) = node.transform().decomposed();
    let transform = Transform {
        translation: Vec3::from(t),
        rotation: Quat::from_array(r),
        scale: Vec3::from(s),
    };
    let name = node.name().unwrap_or_default();
    let mut prims = node
        .mesh()
        .map(|m| read_primitives(&m, buffers))
        .unwrap_or_default();

    let id = if prims.len() == 1 {
        let (mesh, material) = prims.remove(0);
        scene.add_mesh(Some(parent), name, transform, mesh, material)
    } else {
        let group = scene.add_group(Some(parent), name, transform);
        for (i, (mesh, material)) in prims.into_iter().enumerate() {
            let child_name = if name.is_empty() {
                String::new()
            } else {
                format!("{name}_{i}")
            };
            scene.add_mesh(Some(group), &child_name, Transform::default(), mesh, material);
        }
        group
    };
    for child in node.children() {
        insert_gltf_node(scene, id, &child, buffers);
    }
}

fn read_primitives(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Vec<(MeshData, Material)> {
    let mut out = Vec::new();
    for prim in mesh.primitives() {
        if prim.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
        let normals: Vec<Vec3> = reader
            .read_normals()
            .map(|n| n.map(Vec3::from).collect())
            .unwrap_or_default();
        let indices: Vec<u32> = reader
            .read_indices()
            .map(|i| i.into_u32().collect())
            .unwrap_or_else(|| (0..positions.len() as u32).collect());

        let mat = prim.material();
        let [r, g, b, _] = mat.pbr_metallic_roughness().base_color_factor();
        let material = Material::lit(mat.name().unwrap_or_default(), [r, g, b]);
        out.push((MeshData::new(positions, normals, indices), material));
    }
    out
}

// ---------------- Fallback chain ----------------

/// OBJ+MTL path: model with materials, else model with the default
/// material, else the placeholder.
pub fn install_tv_obj(
    scene: &mut SceneGraph,
    registry: &mut TagRegistry,
    urls: &AssetUrls,
    obj: Result<Vec<u8>, ViewerError>,
    mtl: Result<Vec<u8>, ViewerError>,
) -> LoadedTv {
    let mtl = match mtl {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("[assets] {}; loading OBJ without materials", e);
            None
        }
    };
    let inserted = obj.and_then(|obj| {
        insert_obj(
            scene,
            &urls.tv_obj,
            &obj,
            mtl.as_deref(),
            Transform::default().with_scale(TV_MODEL_SCALE),
        )
    });
    match inserted {
        Ok((root, with_materials)) => {
            let source = if with_materials {
                TvSource::Model
            } else {
                TvSource::ModelWithoutMaterials
            };
            finish_tv(scene, registry, root, source)
        }
        Err(e) => {
            log::error!("[assets] TV model failed: {}", e);
            install_placeholder_tv(scene, registry)
        }
    }
}

/// glTF path: model, else the placeholder.
pub fn install_tv_gltf(
    scene: &mut SceneGraph,
    registry: &mut TagRegistry,
    urls: &AssetUrls,
    glb: Result<Vec<u8>, ViewerError>,
) -> LoadedTv {
    let inserted = glb.and_then(|bytes| {
        insert_gltf(
            scene,
            &urls.tv_glb,
            &bytes,
            Transform::default().with_scale(TV_MODEL_SCALE),
        )
    });
    match inserted {
        Ok(root) => finish_tv(scene, registry, root, TvSource::Model),
        Err(e) => {
            log::error!("[assets] TV model failed: {}", e);
            install_placeholder_tv(scene, registry)
        }
    }
}

pub fn install_placeholder_tv(scene: &mut SceneGraph, registry: &mut TagRegistry) -> LoadedTv {
    log::info!("[assets] building placeholder TV");
    let root = build_placeholder_tv(scene);
    finish_tv(scene, registry, root, TvSource::Placeholder)
}

fn finish_tv(
    scene: &SceneGraph,
    registry: &mut TagRegistry,
    root: NodeId,
    source: TvSource,
) -> LoadedTv {
    let focus = tag_tv(scene, root, registry);
    log::info!("[assets] TV ready ({:?}), {} clickable meshes", source, registry.len());
    LoadedTv {
        root,
        source,
        focus,
    }
}

/// Room path: the room is optional, a failure only loses the room.
pub fn install_room(
    scene: &mut SceneGraph,
    registry: &mut TagRegistry,
    url: &str,
    glb: Result<Vec<u8>, ViewerError>,
) -> Option<NodeId> {
    match glb.and_then(|bytes| insert_gltf(scene, url, &bytes, Transform::default())) {
        Ok(root) => {
            let n = tag_room(scene, root, registry);
            log::info!("[assets] room ready, {} meshes", n);
            Some(root)
        }
        Err(e) => {
            log::error!("[assets] room failed: {}", e);
            None
        }
    }
}

// ---------------- Fetch ----------------

#[cfg(target_arch = "wasm32")]
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ViewerError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| ViewerError::fetch(url, "no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| ViewerError::fetch(url, format!("{:?}", e)))?;
    let resp: web_sys::Response = resp
        .dyn_into()
        .map_err(|_| ViewerError::fetch(url, "not a Response"))?;
    if !resp.ok() {
        return Err(ViewerError::fetch(url, format!("HTTP {}", resp.status())));
    }
    let buf = resp
        .array_buffer()
        .map_err(|e| ViewerError::fetch(url, format!("{:?}", e)))?;
    let buf = JsFuture::from(buf)
        .await
        .map_err(|e| ViewerError::fetch(url, format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
