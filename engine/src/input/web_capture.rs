//! Browser pointer lock backend (wasm32 only).
//!
//! Pointer lock in the browser is asynchronous: `requestPointerLock` returns
//! immediately and the document later fires `pointerlockchange` or
//! `pointerlockerror`. Both are queued as [`CaptureNotice`]s, which the
//! controller drains at the start of each frame.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement};

use super::pointer_capture::{CaptureError, CaptureNotice, CaptureRequest, PointerCapture};

type NoticeQueue = Rc<RefCell<Vec<CaptureNotice>>>;

/// A document listener kept alive until it is removed.
struct DocumentListener {
    event: &'static str,
    callback: Closure<dyn FnMut()>,
}

/// Pointer lock on a page element, plus the touch joystick overlay.
pub struct WebCapture {
    document: Option<Document>,
    target: Option<Element>,
    touch_nodes: Vec<Element>,
    notices: NoticeQueue,
    listeners: Vec<DocumentListener>,
}

impl WebCapture {
    /// Binds to the element with `target_id`.
    pub fn new(target_id: &str) -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        let target = document.as_ref().and_then(|d| d.get_element_by_id(target_id));
        if target.is_none() {
            log::warn!("pointer lock target #{target_id} not found");
        }
        Self::attach(document, target)
    }

    /// Binds to an element the caller already holds (usually the canvas).
    pub fn for_element(target: Element) -> Self {
        let document = target.owner_document();
        Self::attach(document, Some(target))
    }

    fn attach(document: Option<Document>, target: Option<Element>) -> Self {
        let mut capture = Self {
            document,
            target,
            touch_nodes: Vec::new(),
            notices: Rc::new(RefCell::new(Vec::new())),
            listeners: Vec::new(),
        };
        capture.listen_for_lock_changes();
        capture
    }

    fn listen_for_lock_changes(&mut self) {
        let (Some(document), Some(target)) = (self.document.clone(), self.target.clone()) else {
            return;
        };

        let queue = Rc::clone(&self.notices);
        let doc = document.clone();
        let on_change = Closure::<dyn FnMut()>::new(move || {
            let locked = doc
                .pointer_lock_element()
                .is_some_and(|element| element == target);
            queue.borrow_mut().push(CaptureNotice::Changed(locked));
        });

        let queue = Rc::clone(&self.notices);
        let on_error = Closure::<dyn FnMut()>::new(move || {
            queue.borrow_mut().push(CaptureNotice::Failed);
        });

        for (event, callback) in [("pointerlockchange", on_change), ("pointerlockerror", on_error)] {
            match document.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
                Ok(()) => self.listeners.push(DocumentListener { event, callback }),
                Err(err) => log::warn!("failed to listen for {event}: {err:?}"),
            }
        }
    }

    fn styled_div(&self, styles: &[(&str, &str)]) -> Option<Element> {
        let document = self.document.as_ref()?;
        let element = document.create_element("div").ok()?;
        let html = element.dyn_ref::<HtmlElement>()?;
        for (property, value) in styles {
            if let Err(err) = html.style().set_property(property, value) {
                log::debug!("touch control style {property} failed: {err:?}");
            }
        }
        Some(element)
    }
}

impl PointerCapture for WebCapture {
    fn is_supported(&self) -> bool {
        self.document.is_some() && self.target.is_some()
    }

    fn request_capture(&mut self) -> Result<CaptureRequest, CaptureError> {
        let target = self.target.as_ref().ok_or(CaptureError::Unsupported)?;
        target.request_pointer_lock();
        Ok(CaptureRequest::Pending)
    }

    fn release_capture(&mut self) {
        if let Some(document) = &self.document {
            document.exit_pointer_lock();
        }
    }

    fn is_captured(&self) -> bool {
        match (&self.document, &self.target) {
            (Some(document), Some(target)) => document
                .pointer_lock_element()
                .is_some_and(|locked| &locked == target),
            _ => false,
        }
    }

    fn is_touch_device(&self) -> bool {
        web_sys::window().is_some_and(|w| w.navigator().max_touch_points() > 0)
    }

    fn mount_touch_controls(&mut self) -> bool {
        if !self.is_touch_device() || !self.touch_nodes.is_empty() {
            return false;
        }
        let Some(body) = self.document.as_ref().and_then(|d| d.body()) else {
            return false;
        };

        let pad = self.styled_div(&[
            ("position", "fixed"),
            ("bottom", "100px"),
            ("left", "20px"),
            ("width", "150px"),
            ("height", "150px"),
            ("z-index", "1000"),
        ]);
        let joystick = self.styled_div(&[
            ("position", "fixed"),
            ("bottom", "100px"),
            ("right", "20px"),
            ("width", "120px"),
            ("height", "120px"),
            ("border-radius", "50%"),
            ("background-color", "rgba(255,255,255,0.2)"),
            ("z-index", "1000"),
        ]);

        for node in [pad, joystick].into_iter().flatten() {
            match body.append_child(&node) {
                Ok(_) => self.touch_nodes.push(node),
                Err(err) => log::warn!("failed to mount touch control: {err:?}"),
            }
        }
        !self.touch_nodes.is_empty()
    }

    fn unmount_touch_controls(&mut self) {
        for node in self.touch_nodes.drain(..) {
            node.remove();
        }
    }

    fn take_notices(&mut self) -> Vec<CaptureNotice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Some(document) = &self.document {
                let removed = document.remove_event_listener_with_callback(
                    listener.event,
                    listener.callback.as_ref().unchecked_ref(),
                );
                if let Err(err) = removed {
                    log::debug!("failed to remove {} listener: {err:?}", listener.event);
                }
            }
        }
        self.notices.borrow_mut().clear();
    }
}

impl Drop for WebCapture {
    fn drop(&mut self) {
        self.detach();
    }
}
