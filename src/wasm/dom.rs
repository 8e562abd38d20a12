//! DOM lookups and scoped registrations. Each guard owns its JS callback and
//! deregisters it when dropped, so nothing fires against an unmounted widget.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverInit,
};

use crate::error::SiteError;

pub fn js_error(err: impl fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub fn js_value_to_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| js_error("no window"))
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn require<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    by_id(document, id).ok_or_else(|| js_error(SiteError::MissingElement(format!("#{id}"))))
}

/// All elements matching `selector`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        log::warn!("style {property}: {}", js_value_to_string(&err));
    }
}

pub fn set_attr(el: &Element, name: &str, value: &str) {
    if let Err(err) = el.set_attribute(name, value) {
        log::warn!("attribute {name}: {}", js_value_to_string(&err));
    }
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    if let Err(err) = el.class_list().toggle_with_force(class, on) {
        log::warn!("class {class}: {}", js_value_to_string(&err));
    }
}

/// `addEventListener`, removed again on drop.
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// `setInterval`, cleared on drop.
pub struct Interval {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period_ms: u32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms.min(i32::MAX as u32) as i32,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
        }
    }
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop. The callback receives the frame
/// timestamp in milliseconds. Dropping the loop cancels the pending frame.
pub struct AnimationLoop {
    slot: FrameSlot,
    handle: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(mut frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        // `slot` holds the frame closure so that it can keep calling
        // `request_animation_frame` on itself; `Drop` empties it again.
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let next = Rc::clone(&slot);
        let next_handle = Rc::clone(&handle);
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            frame(now);
            let Some(window) = web_sys::window() else {
                next_handle.set(None);
                return;
            };
            let requested = match next.borrow().as_ref() {
                Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref()),
                None => return,
            };
            match requested {
                Ok(id) => next_handle.set(Some(id)),
                Err(err) => {
                    log::warn!("animation frame: {}", js_value_to_string(&err));
                    next_handle.set(None);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = {
            let cb = slot.borrow();
            let cb = cb.as_ref().ok_or_else(|| js_error("animation closure missing"))?;
            window()?.request_animation_frame(cb.as_ref().unchecked_ref())?
        };
        handle.set(Some(id));
        Ok(Self { slot, handle })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(window), Some(id)) = (web_sys::window(), self.handle.take()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.slot.borrow_mut().take();
    }
}

/// An `IntersectionObserver` watching a fixed set of elements, disconnected on drop.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Observer {
    pub fn new(
        threshold: f64,
        targets: &[Element],
        on_entries: impl FnMut(js_sys::Array, IntersectionObserver) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(
            Box::new(on_entries) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>
        );
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for target in targets {
            observer.observe(target);
        }
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
