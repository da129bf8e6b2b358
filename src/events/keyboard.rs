use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::MAGAZINE_CLOSE_ID;
use crate::dom;
use crate::frame::ViewerState;
use crate::viewer::DismissReason;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, state: &Rc<RefCell<ViewerState>>) {
    let Some(reason) = DismissReason::for_key(&ev.key()) else {
        return;
    };
    let mut state = state.borrow_mut();
    let state = &mut *state;
    if state.viewer.dismiss_magazine(reason, &mut state.overlays) {
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(state: Rc<RefCell<ViewerState>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &state);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_close_control(document: &web::Document, state: Rc<RefCell<ViewerState>>) {
    let added = dom::add_click_listener(document, MAGAZINE_CLOSE_ID, move |_| {
        let mut state = state.borrow_mut();
        let state = &mut *state;
        state
            .viewer
            .dismiss_magazine(DismissReason::CloseControl, &mut state.overlays);
    });
    if !added {
        log::warn!("[events] no #{} element", MAGAZINE_CLOSE_ID);
    }
}
