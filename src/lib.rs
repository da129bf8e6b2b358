pub mod assets;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod orbit;
pub mod pick;
pub mod placeholder;
pub mod scene;
pub mod tagging;
pub mod timers;
pub mod tween;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use web_entry::start;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    use crate::assets;
    use crate::config::{AssetStrategy, ViewerConfig};
    use crate::constants::CANVAS_ID;
    use crate::frame::{self, ViewerState};
    use crate::input::PressState;
    use crate::overlay::DomOverlays;
    use crate::placeholder::build_floor;
    use crate::scene::SceneGraph;
    use crate::viewer::{Overlays, Viewer};
    use crate::{dom, events};

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("room-viewer starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init() -> anyhow::Result<()> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;
        dom::wire_canvas_resize(&canvas);

        let config = ViewerConfig::from_element(&canvas);
        log::info!(
            "[config] assets={:?} camera_motion={}",
            config.assets,
            config.camera_motion
        );

        let mut scene = SceneGraph::new();
        build_floor(&mut scene);
        let mut overlays = DomOverlays::new(document.clone());
        overlays.hide_magazine();
        let state = Rc::new(RefCell::new(ViewerState::new(
            Viewer::new(config.clone()),
            scene,
            overlays,
        )));

        spawn_room_load(state.clone(), config.urls.room_glb.clone());
        spawn_tv_load(state.clone(), config);

        events::wire_input_handlers(events::InputWiring {
            canvas: canvas.clone(),
            state: state.clone(),
            press: Rc::new(RefCell::new(PressState::default())),
        });
        events::wire_modal_backdrop(&document, state.clone());
        events::wire_close_control(&document, state.clone());
        events::wire_global_keydown(state.clone());

        // Without a GPU the viewer still runs (timers, overlays), it just draws nothing.
        let gpu = frame::init_gpu(&canvas).await;
        let frame_ctx = Rc::new(RefCell::new(frame::FrameContext { state, canvas, gpu }));
        frame::start_loop(frame_ctx);
        Ok(())
    }

    fn spawn_room_load(state: Rc<RefCell<ViewerState>>, url: String) {
        spawn_local(async move {
            let bytes = assets::fetch_bytes(&url).await;
            let mut s = state.borrow_mut();
            let s = &mut *s;
            assets::install_room(&mut s.scene, &mut s.registry, &url, bytes);
        });
    }

    fn spawn_tv_load(state: Rc<RefCell<ViewerState>>, config: ViewerConfig) {
        let urls = config.urls;
        spawn_local(async move {
            match config.assets {
                AssetStrategy::ObjMtl => {
                    let mtl = assets::fetch_bytes(&urls.tv_mtl).await;
                    let obj = assets::fetch_bytes(&urls.tv_obj).await;
                    let mut s = state.borrow_mut();
                    let s = &mut *s;
                    assets::install_tv_obj(&mut s.scene, &mut s.registry, &urls, obj, mtl);
                }
                AssetStrategy::Gltf => {
                    let glb = assets::fetch_bytes(&urls.tv_glb).await;
                    let mut s = state.borrow_mut();
                    let s = &mut *s;
                    assets::install_tv_gltf(&mut s.scene, &mut s.registry, &urls, glb);
                }
                AssetStrategy::Procedural => {
                    let mut s = state.borrow_mut();
                    let s = &mut *s;
                    assets::install_placeholder_tv(&mut s.scene, &mut s.registry);
                }
            }
        });
    }
}
