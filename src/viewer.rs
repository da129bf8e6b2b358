//! Interaction state for the room viewer.
//!
//! `Viewer` owns the camera pose, orbit controls, the optional focus tween,
//! overlay visibility and the pending tasks. Everything here is driven by
//! explicit `now_ms` values, so the whole click -> tween -> overlay flow runs
//! without a browser.

use crate::camera::CameraPose;
use crate::config::ViewerConfig;
use crate::constants::{
    HIGHLIGHT_FLASH, HIGHLIGHT_NEUTRAL, HIGHLIGHT_RESET_MS, INFO_AUTO_HIDE_MS,
    MAGAZINE_OPEN_DELAY_MS,
};
use crate::input::PointerInput;
use crate::orbit::OrbitControls;
use crate::pick::{resolve, HitClass};
use crate::scene::{NodeId, SceneGraph, TagRegistry};
use crate::timers::TaskQueue;
use crate::tween::CameraTween;

/// Overlay collaborator: an info panel and the magazine modal.
pub trait Overlays {
    fn show_info(&mut self, text: &str);
    fn hide_info(&mut self);
    fn show_magazine(&mut self);
    fn hide_magazine(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Highlight(NodeId),
    InfoPanel,
    OpenMagazine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    CloseControl,
    OutsideClick,
    EscapeKey,
}

impl DismissReason {
    #[inline]
    pub fn for_key(key: &str) -> Option<Self> {
        (key == "Escape").then_some(Self::EscapeKey)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// The magazine is open; scene clicks are swallowed.
    Ignored,
    Miss,
    Focus { node: NodeId, tween_started: bool },
    Marker { node: NodeId },
    Generic { node: NodeId, display_name: String },
    Unclassified { node: NodeId },
}

pub struct Viewer {
    config: ViewerConfig,
    pub pose: CameraPose,
    pub orbit: OrbitControls,
    tween: Option<CameraTween>,
    info: Option<String>,
    magazine_visible: bool,
    timers: TaskQueue<TimerKey>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            pose: CameraPose::default(),
            orbit: OrbitControls::default(),
            tween: None,
            info: None,
            magazine_visible: false,
            timers: TaskQueue::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[inline]
    pub fn tween(&self) -> Option<&CameraTween> {
        self.tween.as_ref()
    }

    #[inline]
    pub fn magazine_visible(&self) -> bool {
        self.magazine_visible
    }

    #[inline]
    pub fn info_text(&self) -> Option<&str> {
        self.info.as_deref()
    }

    #[inline]
    pub fn timers(&self) -> &TaskQueue<TimerKey> {
        &self.timers
    }

    pub fn handle_click(
        &mut self,
        scene: &mut SceneGraph,
        registry: &TagRegistry,
        pointer: &PointerInput,
        now_ms: f64,
        ui: &mut impl Overlays,
    ) -> ClickOutcome {
        if self.magazine_visible {
            return ClickOutcome::Ignored;
        }
        let Some(hit) = resolve(pointer, &self.pose, scene, scene.roots(), registry) else {
            return ClickOutcome::Miss;
        };
        let node = hit.node;
        let name = registry
            .tags(node)
            .map(|t| t.display_name.clone())
            .unwrap_or_default();
        match hit.class {
            HitClass::FocusTarget => {
                log::info!("[click] focus target '{}' at {:.2}", name, hit.distance);
                self.show_info(&format!("{name} - magazine available"), now_ms, ui);
                let tween_started = self.config.camera_motion && self.focus_on(scene, node, now_ms);
                self.timers
                    .schedule(TimerKey::OpenMagazine, now_ms + MAGAZINE_OPEN_DELAY_MS);
                ClickOutcome::Focus {
                    node,
                    tween_started,
                }
            }
            HitClass::Marker => {
                log::info!("[click] marker '{}'", name);
                self.show_info(&format!("{name} - magazine available"), now_ms, ui);
                self.open_magazine(ui);
                ClickOutcome::Marker { node }
            }
            HitClass::Generic { display_name } => {
                log::info!("[click] '{}'", display_name);
                self.show_info(&format!("This is {display_name}"), now_ms, ui);
                if scene.set_emissive(node, HIGHLIGHT_FLASH) {
                    self.timers
                        .schedule(TimerKey::Highlight(node), now_ms + HIGHLIGHT_RESET_MS);
                }
                ClickOutcome::Generic { node, display_name }
            }
            HitClass::Unclassified => ClickOutcome::Unclassified { node },
        }
    }

    /// Starts a tween toward `node`, replacing any tween in flight.
    pub fn focus_on(&mut self, scene: &SceneGraph, node: NodeId, now_ms: f64) -> bool {
        let Some(target) = scene.world_position(node) else {
            return false;
        };
        self.tween = Some(CameraTween::begin(
            &self.pose,
            target,
            now_ms,
            &self.config.tween,
        ));
        self.orbit.set_enabled(false);
        log::info!(
            "[tween] focus -> ({:.2},{:.2},{:.2})",
            target.x,
            target.y,
            target.z
        );
        true
    }

    /// Per-frame step: due tasks first, then exactly one camera driver.
    pub fn frame(&mut self, scene: &mut SceneGraph, now_ms: f64, ui: &mut impl Overlays) {
        for key in self.timers.drain_due(now_ms) {
            match key {
                TimerKey::Highlight(node) => {
                    scene.set_emissive(node, HIGHLIGHT_NEUTRAL);
                }
                TimerKey::InfoPanel => {
                    self.info = None;
                    ui.hide_info();
                }
                TimerKey::OpenMagazine => self.open_magazine(ui),
            }
        }

        match self.tween {
            Some(tween) => {
                let (pose, done) = tween.advance(now_ms);
                self.pose = pose;
                if done {
                    self.tween = None;
                    self.orbit.set_enabled(true);
                    log::debug!("[tween] done");
                }
            }
            None => self.orbit.update(&mut self.pose),
        }
    }

    /// Close control, outside click and Escape all end up here. Also cancels
    /// a magazine open that is still pending.
    pub fn dismiss_magazine(&mut self, reason: DismissReason, ui: &mut impl Overlays) -> bool {
        let pending = self.timers.cancel(&TimerKey::OpenMagazine).is_some();
        if !self.magazine_visible {
            return pending;
        }
        self.magazine_visible = false;
        ui.hide_magazine();
        log::info!("[overlay] magazine closed ({:?})", reason);
        true
    }

    fn open_magazine(&mut self, ui: &mut impl Overlays) {
        self.timers.cancel(&TimerKey::OpenMagazine);
        if !self.magazine_visible {
            self.magazine_visible = true;
            ui.show_magazine();
        }
    }

    fn show_info(&mut self, text: &str, now_ms: f64, ui: &mut impl Overlays) {
        self.info = Some(text.to_string());
        ui.show_info(text);
        self.timers
            .schedule(TimerKey::InfoPanel, now_ms + INFO_AUTO_HIDE_MS);
    }
}
