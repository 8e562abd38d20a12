//! Core of the objective-reduction explainer page: the scroll-section tracker
//! and the three parametric widgets. Everything outside `wasm` is plain Rust
//! and runs under `cargo test` on the host.

pub mod config;
pub mod error;
pub mod integral;
pub mod operator;
pub mod threshold;
pub mod tracker;

pub use config::SiteConfig;
pub use error::SiteError;
pub use integral::PartitionCycle;
pub use operator::{Operator, OperatorState, VisualDescriptor};
pub use threshold::{CollapseState, ThresholdState};
pub use tracker::{Direction, SectionTracker, VisibilityEvent};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::config::SiteConfig;

    pub mod dom;
    mod integral_chart;
    mod operator_panel;
    mod render;
    mod sections;
    mod threshold_meter;

    thread_local! {
        static SITE: RefCell<Option<Site>> = RefCell::new(None);
    }

    /// Everything mounted on the page. Dropping it releases every timer,
    /// listener and observer the widgets registered.
    struct Site {
        sections: Option<sections::SectionNav>,
        _operator: Option<operator_panel::OperatorPanel>,
        _integral: Option<integral_chart::IntegralChart>,
        _threshold: Option<threshold_meter::ThresholdMeter>,
        _background: Option<render::Background>,
    }

    impl Site {
        fn mount(document: &web_sys::Document, config: &SiteConfig) -> Result<Site, JsValue> {
            Ok(Site {
                sections: sections::SectionNav::mount(document, config)?,
                _operator: operator_panel::OperatorPanel::mount(document, config)?,
                _integral: integral_chart::IntegralChart::mount(document, config)?,
                _threshold: threshold_meter::ThresholdMeter::mount(document, config)?,
                _background: render::Background::mount(document),
            })
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let raw = document.body().and_then(|body| body.get_attribute("data-config"));
        let config = SiteConfig::load(raw.as_deref());

        let site = Site::mount(&document, &config).map_err(|err| {
            log::error!("mount failed: {}", dom::js_value_to_string(&err));
            err
        })?;
        SITE.with(|slot| *slot.borrow_mut() = Some(site));
        log::info!("collapse_viz mounted");
        Ok(())
    }

    fn with_sections<T>(f: impl FnOnce(&sections::SectionNav) -> T) -> Option<T> {
        SITE.with(|slot| slot.borrow().as_ref()?.sections.as_ref().map(f))
    }

    /// Scroll to section `index`. Returns false for an unknown index.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(index: u32) -> bool {
        with_sections(|nav| nav.go_to(index as usize)).unwrap_or(false)
    }

    /// Step one section in the direction of `delta`'s sign.
    #[wasm_bindgen(js_name = goRelative)]
    pub fn go_relative(delta: i32) -> bool {
        with_sections(|nav| nav.go_relative(delta)).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index() -> u32 {
        with_sections(|nav| nav.active_index() as u32).unwrap_or(0)
    }

    /// Unmount the page, deregistering all callbacks.
    #[wasm_bindgen]
    pub fn teardown() {
        let site = SITE.with(|slot| slot.borrow_mut().take());
        if site.is_some() {
            drop(site);
            log::info!("collapse_viz torn down");
        }
    }
}
