//! Browser glue: the `requestAnimationFrame` loop and DOM helpers

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// First element found among `ids`
pub fn element_by_ids(document: &Document, ids: &[&str]) -> Option<Element> {
    ids.iter().find_map(|id| document.get_element_by_id(id))
}

/// Toggle the `hidden` class
pub fn set_hidden(el: &Element, hidden: bool) {
    let classes = el.class_list();
    let result = if hidden {
        classes.add_1("hidden")
    } else {
        classes.remove_1("hidden")
    };
    if let Err(e) = result {
        log::warn!("class toggle failed: {:?}", e);
    }
}

/// Attach a listener for the page's lifetime
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// A cancellable `requestAnimationFrame` loop.
///
/// At most one frame is pending at a time. The frame callback returns
/// whether it wants another frame; `cancel` drops the pending one.
pub struct AnimationLoop {
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl AnimationLoop {
    pub fn new(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Rc<Self> {
        let this = Rc::new(Self {
            pending: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak: Weak<Self> = Rc::downgrade(&this);
        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            let Some(this) = weak.upgrade() else { return };
            this.pending.set(None);
            if on_frame(time) {
                if let Err(e) = this.request() {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                }
            }
        });
        *this.callback.borrow_mut() = Some(closure);
        this
    }

    /// Schedule the next frame unless one is already pending
    pub fn request(&self) -> Result<(), JsValue> {
        if self.pending.get().is_some() {
            return Ok(());
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let id = window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.pending.set(Some(id));
        Ok(())
    }

    /// Drop the pending frame, if any
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take()
            && let Ok(window) = window()
        {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
