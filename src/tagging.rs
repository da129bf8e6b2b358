//! One-time tagging passes over freshly loaded subtrees.
//!
//! The TV pass is the same whichever loader produced the subtree (OBJ with or
//! without materials, glTF, or the procedural placeholder).

use crate::scene::{NodeId, SceneGraph, SceneTags, TagRegistry};

const SCREEN_HINTS: &[&str] = &["screen"];
const ROOM_FOCUS_HINTS: &[&str] = &["tv", "television", "screen"];
const MARKER_HINTS: &[&str] = &["marker"];

#[inline]
fn name_has(name: &str, hints: &[&str]) -> bool {
    let lower = name.to_lowercase();
    hints.iter().any(|h| lower.contains(h))
}

/// Registers every TV mesh as clickable. Meshes named (or with a material
/// named) like a screen become focus targets; without one, the first mesh is.
/// Returns the focus node, if the subtree holds any mesh.
pub fn tag_tv(scene: &SceneGraph, root: NodeId, registry: &mut TagRegistry) -> Option<NodeId> {
    let mut first_mesh = None;
    let mut screen = None;
    scene.traverse(root, |id, node| {
        if node.mesh.is_none() {
            return;
        }
        let is_screen = name_has(&node.name, SCREEN_HINTS) || name_has(&node.material.name, SCREEN_HINTS);
        let is_marker = !is_screen && name_has(&node.name, MARKER_HINTS);
        let display_name = if is_screen {
            "TV screen".to_string()
        } else if !node.name.is_empty() {
            node.name.clone()
        } else {
            format!("TV part ({})", registry.len() + 1)
        };
        registry.register(
            id,
            SceneTags {
                focus_target: is_screen,
                marker: is_marker,
                display_name,
            },
        );
        if is_screen {
            screen = Some(id);
        } else if first_mesh.is_none() && !is_marker {
            first_mesh = Some(id);
        }
    });

    if screen.is_some() {
        return screen;
    }
    let fallback = first_mesh?;
    if let Some(tags) = registry.tags_mut(fallback) {
        tags.focus_target = true;
        tags.display_name = "TV".to_string();
    }
    log::info!("[tagging] no screen mesh in TV model, using first mesh");
    Some(fallback)
}

/// Registers every room mesh as clickable under its own name. TV-looking
/// meshes become focus targets and marker meshes become markers.
/// Returns the number of meshes registered.
pub fn tag_room(scene: &SceneGraph, root: NodeId, registry: &mut TagRegistry) -> usize {
    let mut count = 0;
    scene.traverse(root, |id, node| {
        if node.mesh.is_none() {
            return;
        }
        let display_name = if node.name.is_empty() {
            format!("Room part ({})", registry.len() + 1)
        } else {
            node.name.clone()
        };
        registry.register(
            id,
            SceneTags {
                focus_target: name_has(&node.name, ROOM_FOCUS_HINTS),
                marker: name_has(&node.name, MARKER_HINTS),
                display_name,
            },
        );
        count += 1;
    });
    count
}
