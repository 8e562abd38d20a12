use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::dom::{self, AnimationLoop, EventListener};
use crate::config::SiteConfig;
use crate::operator::{Operator, OperatorState, VisualDescriptor};

#[derive(Clone)]
struct PanelView {
    state: Rc<RefCell<OperatorState>>,
    descriptor: Rc<RefCell<VisualDescriptor>>,
    document: Document,
    toggles: Rc<[(Operator, Element)]>,
}

impl PanelView {
    /// Recompute the descriptor after any input change.
    fn refresh(&self) {
        let state = self.state.borrow();
        *self.descriptor.borrow_mut() = state.describe();
        for (op, button) in self.toggles.iter() {
            let on = state.is_active(*op);
            dom::set_class(button, "active", on);
            dom::set_attr(button, "aria-pressed", if on { "true" } else { "false" });
        }
        dom::set_text(&self.document, "distortion-value", &format!("{:.0}", state.distortion()));
        dom::set_text(&self.document, "speed-value", &format!("{:.0}", state.speed()));
    }
}

pub struct OperatorPanel {
    _frames: AnimationLoop,
    _listeners: Vec<EventListener>,
}

impl OperatorPanel {
    pub fn mount(document: &Document, config: &SiteConfig) -> Result<Option<Self>, JsValue> {
        if document.get_element_by_id("operator-panel").is_none() {
            log::debug!("no #operator-panel; operator diagram not mounted");
            return Ok(None);
        }
        let orb: HtmlElement = dom::require(document, "orb")?;

        let toggles = dom::query_all(document, "[data-operator]")?
            .into_iter()
            .filter_map(|el| {
                let op = Operator::from_label(&el.get_attribute("data-operator")?)?;
                if el.text_content().unwrap_or_default().trim().is_empty() {
                    el.set_text_content(Some(&format!("{} · {}", op.label(), op.caption())));
                }
                Some((op, el))
            })
            .collect::<Vec<_>>();

        let state = OperatorState::new(config.distortion_default, config.speed_default);
        let view = PanelView {
            descriptor: Rc::new(RefCell::new(state.describe())),
            state: Rc::new(RefCell::new(state)),
            document: document.clone(),
            toggles: toggles.into(),
        };

        let mut listeners = Vec::new();
        for (op, button) in view.toggles.iter() {
            let view = view.clone();
            let op = *op;
            listeners.push(EventListener::new(button, "click", move |_| {
                let on = view.state.borrow_mut().toggle(op);
                log::debug!("operator {} -> {on}", op.label());
                view.refresh();
            })?);
        }

        let sliders: [(&str, f64, fn(&mut OperatorState, f64)); 2] = [
            ("distortion", config.distortion_default, OperatorState::set_distortion),
            ("speed", config.speed_default, OperatorState::set_speed),
        ];
        for (id, initial, apply) in sliders {
            let Some(input) = dom::by_id::<HtmlInputElement>(document, id) else {
                log::warn!("#{id} slider missing; using {initial}");
                continue;
            };
            input.set_value_as_number(initial);
            let view = view.clone();
            let source = input.clone();
            listeners.push(EventListener::new(&input, "input", move |_| {
                apply(&mut view.state.borrow_mut(), source.value_as_number());
                view.refresh();
            })?);
        }

        let frames = {
            let descriptor = Rc::clone(&view.descriptor);
            AnimationLoop::start(move |now_ms| {
                let d = descriptor.borrow();
                let t = now_ms / 1000.0;
                dom::set_style(&orb, "transform", &d.transform_css());
                dom::set_style(&orb, "background-color", d.color.css());
                dom::set_style(&orb, "box-shadow", &d.glow.box_shadow(d.color));
                dom::set_style(&orb, "border-radius", &d.shape_at(t).to_css());
            })?
        };

        view.refresh();
        log::info!("operator diagram mounted");
        Ok(Some(Self {
            _frames: frames,
            _listeners: listeners,
        }))
    }
}
