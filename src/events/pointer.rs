use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::frame::ViewerState;
use crate::input::{self, PressState};
use crate::viewer::{ClickOutcome, DismissReason};

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub state: Rc<RefCell<ViewerState>>,
    pub press: Rc<RefCell<PressState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_canvas_click(&w);
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.press.borrow_mut().press(client_pos(&ev));
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut press = w.press.borrow_mut();
        if !press.down {
            return;
        }
        let delta = press.move_to(client_pos(&ev));
        drop(press);
        let height = w.canvas.get_bounding_client_rect().height() as f32;
        w.state
            .borrow_mut()
            .viewer
            .orbit
            .rotate_by_pixels(delta.x, delta.y, height);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.press.borrow_mut().release();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        w.state.borrow_mut().viewer.orbit.zoom(ev.delta_y() as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_canvas_click(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if w.press.borrow().was_drag() {
            return;
        }
        let pointer = input::pointer_in_canvas(&ev, &w.canvas);
        let mut state = w.state.borrow_mut();
        let state = &mut *state;
        let now = state.now_ms();
        let outcome = state.viewer.handle_click(
            &mut state.scene,
            &state.registry,
            &pointer,
            now,
            &mut state.overlays,
        );
        if outcome != ClickOutcome::Ignored {
            log::debug!("[click] {:?}", outcome);
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Clicks on the modal backdrop itself (not its content) dismiss the magazine.
pub fn wire_modal_backdrop(document: &web::Document, state: Rc<RefCell<ViewerState>>) {
    let added = crate::dom::add_click_listener(
        document,
        crate::constants::MAGAZINE_MODAL_ID,
        move |ev| {
            let Some(target) = ev.target() else {
                return;
            };
            let mut state = state.borrow_mut();
            let state = &mut *state;
            if state.overlays.is_modal(&target) {
                state
                    .viewer
                    .dismiss_magazine(DismissReason::OutsideClick, &mut state.overlays);
            }
        },
    );
    if !added {
        log::warn!("[events] magazine modal missing, outside-click dismissal disabled");
    }
}
