// Host-side tests for the click -> tween -> overlay flow.

use glam::Vec3;
use room_viewer::config::ViewerConfig;
use room_viewer::constants::{HIGHLIGHT_FLASH, HIGHLIGHT_NEUTRAL};
use room_viewer::input::PointerInput;
use room_viewer::placeholder::box_mesh;
use room_viewer::scene::{Material, NodeId, SceneGraph, SceneTags, TagRegistry, Transform};
use room_viewer::viewer::*;

#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl Overlays for Recorder {
    fn show_info(&mut self, text: &str) {
        self.calls.push(format!("info:{text}"));
    }
    fn hide_info(&mut self) {
        self.calls.push("hide_info".into());
    }
    fn show_magazine(&mut self) {
        self.calls.push("magazine".into());
    }
    fn hide_magazine(&mut self) {
        self.calls.push("hide_magazine".into());
    }
}

const CENTER: PointerInput = PointerInput {
    x: 400.0,
    y: 300.0,
    width: 800.0,
    height: 600.0,
};

const CORNER: PointerInput = PointerInput {
    x: 0.0,
    y: 0.0,
    width: 800.0,
    height: 600.0,
};

/// One unit box at the origin, straight ahead of the default camera.
fn scene_with(tags: Option<SceneTags>) -> (SceneGraph, TagRegistry, NodeId) {
    let mut scene = SceneGraph::new();
    let id = scene.add_mesh(
        None,
        "box",
        Transform::default(),
        box_mesh(1.0, 1.0, 1.0),
        Material::lit("box", [0.5, 0.5, 0.5]),
    );
    let mut registry = TagRegistry::new();
    if let Some(t) = tags {
        registry.register(id, t);
    }
    (scene, registry, id)
}

fn focus_tags() -> SceneTags {
    SceneTags {
        focus_target: true,
        marker: false,
        display_name: "TV screen".into(),
    }
}

fn marker_tags() -> SceneTags {
    SceneTags {
        focus_target: false,
        marker: true,
        display_name: "Magazine marker".into(),
    }
}

#[test]
fn generic_click_flashes_then_resets_at_two_seconds() {
    let (mut scene, registry, id) = scene_with(Some(SceneTags::named("Wall-03")));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    let outcome = viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    assert_eq!(
        outcome,
        ClickOutcome::Generic {
            node: id,
            display_name: "Wall-03".into()
        }
    );
    assert_eq!(ui.calls, vec!["info:This is Wall-03".to_string()]);
    assert_eq!(viewer.info_text(), Some("This is Wall-03"));
    assert_eq!(scene.get(id).unwrap().material.emissive, HIGHLIGHT_FLASH);
    assert!(viewer.tween().is_none());
    assert!(!viewer.magazine_visible());

    viewer.frame(&mut scene, 1999.0, &mut ui);
    assert_eq!(scene.get(id).unwrap().material.emissive, HIGHLIGHT_FLASH);
    viewer.frame(&mut scene, 2000.0, &mut ui);
    assert_eq!(scene.get(id).unwrap().material.emissive, HIGHLIGHT_NEUTRAL);
}

#[test]
fn repeated_generic_click_extends_highlight() {
    let (mut scene, registry, id) = scene_with(Some(SceneTags::named("Wall-03")));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    viewer.handle_click(&mut scene, &registry, &CENTER, 1500.0, &mut ui);
    viewer.frame(&mut scene, 2000.0, &mut ui);
    assert_eq!(scene.get(id).unwrap().material.emissive, HIGHLIGHT_FLASH);
    viewer.frame(&mut scene, 3500.0, &mut ui);
    assert_eq!(scene.get(id).unwrap().material.emissive, HIGHLIGHT_NEUTRAL);
}

#[test]
fn focus_click_tweens_and_opens_magazine_after_delay() {
    let (mut scene, registry, id) = scene_with(Some(focus_tags()));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    let outcome = viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    assert_eq!(
        outcome,
        ClickOutcome::Focus {
            node: id,
            tween_started: true
        }
    );
    assert_eq!(ui.calls, vec!["info:TV screen - magazine available".to_string()]);
    assert!(!viewer.orbit.is_enabled());
    let end = viewer.tween().unwrap().end;
    assert_eq!(end.target, Vec3::ZERO);
    assert_eq!(end.fov_deg, 45.0);

    viewer.frame(&mut scene, 500.0, &mut ui);
    assert!(!viewer.magazine_visible());
    assert!(viewer.pose.fov_deg < 75.0 && viewer.pose.fov_deg > 45.0);

    viewer.frame(&mut scene, 800.0, &mut ui);
    assert!(viewer.magazine_visible());
    assert_eq!(ui.calls.last().map(String::as_str), Some("magazine"));

    viewer.frame(&mut scene, 1000.0, &mut ui);
    assert!(viewer.tween().is_none());
    assert!(viewer.orbit.is_enabled());
    assert_eq!(viewer.pose, end);
}

#[test]
fn focus_wins_over_marker() {
    let tags = SceneTags {
        focus_target: true,
        marker: true,
        display_name: "TV screen".into(),
    };
    let (mut scene, registry, id) = scene_with(Some(tags));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();
    let outcome = viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    assert_eq!(
        outcome,
        ClickOutcome::Focus {
            node: id,
            tween_started: true
        }
    );
    assert!(!viewer.magazine_visible());
}

#[test]
fn focus_without_camera_motion_only_opens_overlays() {
    let (mut scene, registry, id) = scene_with(Some(focus_tags()));
    let config = ViewerConfig {
        camera_motion: false,
        ..ViewerConfig::default()
    };
    let mut viewer = Viewer::new(config);
    let mut ui = Recorder::default();

    let outcome = viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    assert_eq!(
        outcome,
        ClickOutcome::Focus {
            node: id,
            tween_started: false
        }
    );
    assert!(viewer.tween().is_none());
    assert!(viewer.orbit.is_enabled());
    viewer.frame(&mut scene, 800.0, &mut ui);
    assert!(viewer.magazine_visible());
}

#[test]
fn marker_click_opens_magazine_immediately() {
    let (mut scene, registry, id) = scene_with(Some(marker_tags()));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    let outcome = viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    assert_eq!(outcome, ClickOutcome::Marker { node: id });
    assert!(viewer.magazine_visible());
    assert!(viewer.tween().is_none());
    assert_eq!(ui.calls.last().map(String::as_str), Some("magazine"));
}

#[test]
fn miss_touches_nothing() {
    let (mut scene, registry, _) = scene_with(Some(focus_tags()));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    let outcome = viewer.handle_click(&mut scene, &registry, &CORNER, 0.0, &mut ui);
    assert_eq!(outcome, ClickOutcome::Miss);
    assert!(ui.calls.is_empty());
    assert!(viewer.tween().is_none());
    assert!(viewer.timers().is_empty());
}

#[test]
fn unregistered_mesh_is_unclassified() {
    let (mut scene, registry, id) = scene_with(None);
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    let outcome = viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    assert_eq!(outcome, ClickOutcome::Unclassified { node: id });
    assert!(ui.calls.is_empty());
    assert_eq!(scene.get(id).unwrap().material.emissive, HIGHLIGHT_NEUTRAL);
}

#[test]
fn clicks_are_ignored_while_magazine_is_open() {
    let (mut scene, registry, _) = scene_with(Some(marker_tags()));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    let calls = ui.calls.len();
    let outcome = viewer.handle_click(&mut scene, &registry, &CENTER, 10.0, &mut ui);
    assert_eq!(outcome, ClickOutcome::Ignored);
    assert_eq!(ui.calls.len(), calls);
}

#[test]
fn every_dismiss_path_hides_the_magazine() {
    for reason in [
        DismissReason::CloseControl,
        DismissReason::OutsideClick,
        DismissReason::EscapeKey,
    ] {
        let (mut scene, registry, _) = scene_with(Some(marker_tags()));
        let mut viewer = Viewer::new(ViewerConfig::default());
        let mut ui = Recorder::default();
        viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);

        assert!(viewer.dismiss_magazine(reason, &mut ui));
        assert!(!viewer.magazine_visible());
        assert_eq!(ui.calls.last().map(String::as_str), Some("hide_magazine"));
        // Second dismissal has nothing to do
        assert!(!viewer.dismiss_magazine(reason, &mut ui));
    }
}

#[test]
fn dismiss_cancels_pending_open() {
    let (mut scene, registry, _) = scene_with(Some(focus_tags()));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    assert!(viewer.dismiss_magazine(DismissReason::EscapeKey, &mut ui));
    viewer.frame(&mut scene, 800.0, &mut ui);
    assert!(!viewer.magazine_visible());
    assert!(!ui.calls.iter().any(|c| c == "magazine"));
}

#[test]
fn escape_is_the_only_dismiss_key() {
    assert_eq!(DismissReason::for_key("Escape"), Some(DismissReason::EscapeKey));
    assert_eq!(DismissReason::for_key("Enter"), None);
    assert_eq!(DismissReason::for_key("escape"), None);
}

#[test]
fn info_panel_hides_five_seconds_after_last_show() {
    let (mut scene, registry, _) = scene_with(Some(SceneTags::named("Chair")));
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    viewer.handle_click(&mut scene, &registry, &CENTER, 0.0, &mut ui);
    viewer.handle_click(&mut scene, &registry, &CENTER, 3000.0, &mut ui);
    viewer.frame(&mut scene, 5000.0, &mut ui);
    assert_eq!(viewer.info_text(), Some("This is Chair"));
    assert!(!ui.calls.iter().any(|c| c == "hide_info"));

    viewer.frame(&mut scene, 8000.0, &mut ui);
    assert_eq!(viewer.info_text(), None);
    assert_eq!(ui.calls.last().map(String::as_str), Some("hide_info"));
}

#[test]
fn refocus_replaces_tween_in_flight() {
    let (mut scene, mut registry, first) = scene_with(Some(focus_tags()));
    let second = scene.add_mesh(
        None,
        "other",
        Transform::from_translation(Vec3::new(2.0, 0.5, 0.0)),
        box_mesh(0.5, 0.5, 0.5),
        Material::default(),
    );
    registry.register(second, focus_tags());
    let mut viewer = Viewer::new(ViewerConfig::default());
    let mut ui = Recorder::default();

    assert!(viewer.focus_on(&scene, first, 0.0));
    viewer.frame(&mut scene, 400.0, &mut ui);
    let mid = viewer.pose;
    assert!(viewer.focus_on(&scene, second, 400.0));
    let tween = viewer.tween().unwrap();
    assert_eq!(tween.start, mid);
    assert_eq!(tween.end.target, Vec3::new(2.0, 0.5, 0.0));

    viewer.frame(&mut scene, 1400.0, &mut ui);
    assert_eq!(viewer.pose.target, Vec3::new(2.0, 0.5, 0.0));
    assert!(viewer.orbit.is_enabled());
}
