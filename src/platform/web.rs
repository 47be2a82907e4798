//! Browser resource guards
//!
//! Every DOM listener and the animation-frame loop are owned by a guard whose
//! `Drop` releases them, so teardown happens on every exit path.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, Window};

/// An event listener that is removed when dropped
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new<E, F>(target: &EventTarget, kind: &'static str, mut handler: F) -> Self
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            handler(event.unchecked_into::<E>());
        });
        if let Err(err) =
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("Could not listen for {kind}: {err:?}");
        }
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop; the pending frame is cancelled on drop
pub struct FrameLoop {
    window: Window,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let pending = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(&callback);
        let frame_window = window.clone();
        let frame_pending = pending.clone();
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            frame_pending.set(None);
            on_frame(time);

            let Some(callback) = weak.upgrade() else {
                return;
            };
            let callback = callback.borrow();
            if let Some(closure) = callback.as_ref() {
                match frame_window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    Ok(id) => frame_pending.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
                }
            }
        }));

        let first = {
            let callback = callback.borrow();
            let closure = callback
                .as_ref()
                .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
            window.request_animation_frame(closure.as_ref().unchecked_ref())?
        };
        pending.set(Some(first));

        Ok(Self {
            window,
            pending,
            callback,
        })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

/// Drop `value` on a later task.
///
/// Used when a guard is released from inside one of its own callbacks.
pub fn release_later<T: 'static>(value: T) {
    wasm_bindgen_futures::spawn_local(async move {
        drop(value);
    });
}
