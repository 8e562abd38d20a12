use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use super::dom::{self, EventListener};
use crate::config::SiteConfig;
use crate::threshold::ThresholdState;

pub struct ThresholdMeter {
    _listener: EventListener,
}

impl ThresholdMeter {
    pub fn mount(document: &Document, config: &SiteConfig) -> Result<Option<Self>, JsValue> {
        let Some(root) = document.get_element_by_id("threshold-meter") else {
            log::debug!("no #threshold-meter; threshold meter not mounted");
            return Ok(None);
        };
        let input: HtmlInputElement = dom::require(document, "energy")?;
        let state = Rc::new(RefCell::new(ThresholdState::new(config.energy_default)));
        input.set_value_as_number(state.borrow().energy());
        render(document, &root, &state.borrow());

        let listener = {
            let document = document.clone();
            let source = input.clone();
            EventListener::new(&input, "input", move |_| {
                let mut s = state.borrow_mut();
                let was_met = s.threshold_met();
                s.set_energy(source.value_as_number());
                if s.threshold_met() != was_met {
                    log::debug!("threshold -> {}", s.state().label());
                }
                render(&document, &root, &s);
            })?
        };
        log::info!("threshold meter mounted");
        Ok(Some(Self {
            _listener: listener,
        }))
    }
}

fn render(document: &Document, root: &Element, state: &ThresholdState) {
    dom::set_text(document, "energy-value", &format!("{:.0}", state.energy()));
    dom::set_text(document, "tau-value", &state.tau_label());
    dom::set_text(document, "collapse-state", state.state().label());
    dom::set_class(root, "collapse", state.threshold_met());
    if let Some(fill) = dom::by_id::<HtmlElement>(document, "energy-fill") {
        dom::set_style(&fill, "width", &format!("{:.1}%", state.fill_fraction() * 100.0));
    }
}
