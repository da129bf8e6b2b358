use web_sys as web;

use crate::constants::{INFO_PANEL_ID, MAGAZINE_MODAL_ID};
use crate::viewer::Overlays;

/// The `#info` panel and `#magazine-modal` of the host page.
///
/// Either element may be missing; the matching calls then do nothing.
pub struct DomOverlays {
    document: web::Document,
}

impl DomOverlays {
    pub fn new(document: web::Document) -> Self {
        if document.get_element_by_id(INFO_PANEL_ID).is_none() {
            log::warn!("[overlay] no #{} element, info text disabled", INFO_PANEL_ID);
        }
        if document.get_element_by_id(MAGAZINE_MODAL_ID).is_none() {
            log::warn!("[overlay] no #{} element, magazine disabled", MAGAZINE_MODAL_ID);
        }
        Self { document }
    }

    #[inline]
    fn set_display(&self, id: &str, display: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            _ = el.set_attribute("style", &format!("display:{display}"));
        }
    }

    #[inline]
    pub fn is_modal(&self, target: &web::EventTarget) -> bool {
        self.document
            .get_element_by_id(MAGAZINE_MODAL_ID)
            .map(|el| {
                let el: &web::EventTarget = el.as_ref();
                el == target
            })
            .unwrap_or(false)
    }
}

impl Overlays for DomOverlays {
    fn show_info(&mut self, text: &str) {
        if let Some(el) = self.document.get_element_by_id(INFO_PANEL_ID) {
            el.set_text_content(Some(text));
            _ = el.set_attribute("style", "display:block");
        }
    }

    fn hide_info(&mut self) {
        self.set_display(INFO_PANEL_ID, "none");
    }

    fn show_magazine(&mut self) {
        self.set_display(MAGAZINE_MODAL_ID, "flex");
    }

    fn hide_magazine(&mut self) {
        self.set_display(MAGAZINE_MODAL_ID, "none");
    }
}
