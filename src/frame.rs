use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::overlay::DomOverlays;
use crate::render;
use crate::scene::{SceneGraph, TagRegistry};
use crate::viewer::Viewer;

/// Everything the event handlers, the asset loaders and the frame loop share.
pub struct ViewerState {
    pub viewer: Viewer,
    pub scene: SceneGraph,
    pub registry: TagRegistry,
    pub overlays: DomOverlays,
    clock: Instant,
}

impl ViewerState {
    pub fn new(viewer: Viewer, scene: SceneGraph, overlays: DomOverlays) -> Self {
        Self {
            viewer,
            scene,
            registry: TagRegistry::new(),
            overlays,
            clock: Instant::now(),
        }
    }

    /// Milliseconds since startup; the single time base for tweens and timers.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }
}

pub struct FrameContext<'a> {
    pub state: Rc<RefCell<ViewerState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let now = state.now_ms();
        state
            .viewer
            .frame(&mut state.scene, now, &mut state.overlays);

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            g.sync_scene(&state.scene);
            if let Err(e) = g.render(&state.scene, &state.viewer.pose) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
