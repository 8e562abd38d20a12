use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use super::dom::{self, Interval};
use crate::config::SiteConfig;
use crate::integral::{self, PartitionCycle};

pub struct IntegralChart {
    _timer: Interval,
}

impl IntegralChart {
    pub fn mount(document: &Document, config: &SiteConfig) -> Result<Option<Self>, JsValue> {
        let Some(container) = dom::by_id::<HtmlElement>(document, "integral-bars") else {
            log::debug!("no #integral-bars; integral chart not mounted");
            return Ok(None);
        };
        let cycle = Rc::new(RefCell::new(PartitionCycle::new()));
        draw(document, &container, cycle.borrow().n())?;

        let timer = {
            let document = document.clone();
            Interval::new(config.partition_interval_ms, move || {
                let n = cycle.borrow_mut().tick();
                if let Err(err) = draw(&document, &container, n) {
                    log::warn!("integral chart redraw: {}", dom::js_value_to_string(&err));
                }
            })?
        };
        log::info!("integral chart mounted");
        Ok(Some(Self { _timer: timer }))
    }
}

/// Replace every bar with a fresh set for `n` partitions.
fn draw(document: &Document, container: &HtmlElement, n: u32) -> Result<(), JsValue> {
    container.set_inner_html("");
    let width = format!("{:.4}%", 100.0 / f64::from(n));
    for height in integral::bars(n) {
        let bar = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        bar.set_class_name("bar");
        dom::set_style(&bar, "width", &width);
        dom::set_style(&bar, "height", &format!("{:.2}%", height * 100.0));
        container.append_child(&bar)?;
    }
    dom::set_text(document, "integral-n", &format!("n = {n}"));
    dom::set_text(
        document,
        "integral-sum",
        &format!("Σ ≈ {:.4}", integral::riemann_sum(n)),
    );
    Ok(())
}
