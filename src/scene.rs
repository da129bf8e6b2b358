//! Arena scene graph and the semantic tags attached to its nodes.
//!
//! Nodes are addressed by stable [`NodeId`]s and never removed, so ids held by
//! pending timers or hits stay valid for the lifetime of the scene. Tags live
//! beside the graph in a [`TagRegistry`]; the registry doubles as the set of
//! clickable nodes.

use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    /// Diffuse-lit with an emissive channel (can be highlighted).
    Lit,
    /// Flat color, no emissive channel.
    Unlit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 3],
    pub emissive: [f32; 3],
    pub kind: MaterialKind,
}

impl Default for Material {
    fn default() -> Self {
        Self::lit("default", [0.8, 0.8, 0.8])
    }
}

impl Material {
    pub fn lit(name: &str, base_color: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            emissive: [0.0; 3],
            kind: MaterialKind::Lit,
        }
    }

    pub fn unlit(name: &str, base_color: [f32; 3]) -> Self {
        Self {
            kind: MaterialKind::Unlit,
            ..Self::lit(name, base_color)
        }
    }

    #[inline]
    pub fn has_emissive(&self) -> bool {
        self.kind == MaterialKind::Lit
    }
}

/// Axis-aligned bounding box in node-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            };
        };
        points.iter().skip(1).fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, p| Self {
                min: acc.min.min(*p),
                max: acc.max.max(*p),
            },
        )
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Triangle mesh in node-local space.
#[derive(Clone, Debug)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl MeshData {
    /// Builds a mesh, computing smooth normals when none (or a mismatched
    /// count) are supplied.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let normals = if normals.len() == positions.len() {
            normals
        } else {
            vertex_normals(&positions, &indices)
        };
        let bounds = Aabb::from_points(&positions);
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Builds a mesh from flat `[x, y, z, x, y, z, ...]` buffers.
    pub fn from_flat(positions: &[f32], normals: &[f32], indices: Vec<u32>) -> Self {
        let to_vec3 = |flat: &[f32]| -> Vec<Vec3> {
            flat.chunks_exact(3)
                .map(|c| Vec3::new(c[0], c[1], c[2]))
                .collect()
        };
        Self::new(to_vec3(positions), to_vec3(normals), indices)
    }

    /// Triangles in local space; index triples pointing outside the vertex
    /// list are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let a = *self.positions.get(tri[0] as usize)?;
            let b = *self.positions.get(tri[1] as usize)?;
            let c = *self.positions.get(tri[2] as usize)?;
            Some([a, b, c])
        })
    }
}

fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if ia >= positions.len() || ib >= positions.len() || ic >= positions.len() {
            continue;
        }
        let face = (positions[ib] - positions[ia]).cross(positions[ic] - positions[ia]);
        normals[ia] += face;
        normals[ib] += face;
        normals[ic] += face;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub transform: Transform,
    pub mesh: Option<MeshData>,
    pub material: Material,
}

#[derive(Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    revision: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty grouping node.
    pub fn add_group(&mut self, parent: Option<NodeId>, name: &str, transform: Transform) -> NodeId {
        self.push(parent, name, transform, None, Material::default())
    }

    pub fn add_mesh(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        transform: Transform,
        mesh: MeshData,
        material: Material,
    ) -> NodeId {
        self.push(parent, name, transform, Some(mesh), material)
    }

    fn push(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        transform: Transform,
        mesh: Option<MeshData>,
        material: Material,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        // A dangling parent id degrades to a root node.
        let parent = parent.filter(|p| p.index() < self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.to_string(),
            parent,
            children: SmallVec::new(),
            transform,
            mesh,
            material,
        });
        match parent {
            Some(p) => self.nodes[p.index()].children.push(id),
            None => self.roots.push(id),
        }
        self.revision += 1;
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.index())
    }

    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bumped whenever a node is added; the renderer uses it to notice new meshes.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cur = self.get(id);
        while let Some(node) = cur {
            m = node.transform.matrix() * m;
            cur = node.parent.and_then(|p| self.get(p));
        }
        m
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.get(id)?;
        Some(self.world_matrix(id).transform_point3(Vec3::ZERO))
    }

    /// Depth-first, pre-order walk of the subtree under `root`.
    pub fn traverse(&self, root: NodeId, mut visit: impl FnMut(NodeId, &SceneNode)) {
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        stack.push(root);
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            visit(id, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Mesh nodes reachable from `roots`, in traversal order.
    pub fn mesh_nodes(&self, roots: &[NodeId]) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &root in roots {
            self.traverse(root, |id, node| {
                if node.mesh.is_some() {
                    out.push(id);
                }
            });
        }
        out
    }

    /// Sets the emissive color of a lit node. Returns false (and changes
    /// nothing) for unknown nodes and unlit materials.
    pub fn set_emissive(&mut self, id: NodeId, rgb: [f32; 3]) -> bool {
        match self.get_mut(id) {
            Some(node) if node.material.has_emissive() => {
                node.material.emissive = rgb;
                true
            }
            _ => false,
        }
    }
}

/// Semantic tags read by the hit resolver.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneTags {
    pub focus_target: bool,
    pub marker: bool,
    pub display_name: String,
}

impl SceneTags {
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Default::default()
        }
    }
}

/// Clickable nodes and their tags, in registration order.
#[derive(Default)]
pub struct TagRegistry {
    tags: FnvHashMap<NodeId, SceneTags>,
    order: Vec<NodeId>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: NodeId, tags: SceneTags) {
        if self.tags.insert(id, tags).is_none() {
            self.order.push(id);
        }
    }

    #[inline]
    pub fn tags(&self, id: NodeId) -> Option<&SceneTags> {
        self.tags.get(&id)
    }

    #[inline]
    pub fn tags_mut(&mut self, id: NodeId) -> Option<&mut SceneTags> {
        self.tags.get_mut(&id)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.tags.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneTags)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.tags.get(id).map(|t| (*id, t)))
    }

    pub fn focus_targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, t)| t.focus_target)
            .map(|(id, _)| id)
    }
}
