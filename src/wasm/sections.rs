//! Binds [`SectionTracker`] to the page: an intersection observer over every
//! `[data-section]` block, the nav dots and the prev/next buttons.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, IntersectionObserverEntry, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::dom::{self, EventListener, Observer};
use crate::config::SiteConfig;
use crate::tracker::{Direction, SectionTracker, VisibilityEvent};

const INDEX_ATTR: &str = "data-section-index";

/// Elements the tracker drives. Cloned into every callback.
#[derive(Clone)]
struct NavView {
    tracker: Rc<RefCell<SectionTracker>>,
    sections: Rc<[Element]>,
    dots: Rc<[(usize, Element)]>,
    prev: Option<HtmlButtonElement>,
    next: Option<HtmlButtonElement>,
}

impl NavView {
    fn sync(&self) {
        let (active, can_prev, can_next) = {
            let t = self.tracker.borrow();
            (t.active_index(), t.can_go_prev(), t.can_go_next())
        };
        for (index, dot) in self.dots.iter() {
            dom::set_class(dot, "active", *index == active);
        }
        for (i, section) in self.sections.iter().enumerate() {
            dom::set_class(section, "in-view", i == active);
        }
        if let Some(prev) = &self.prev {
            prev.set_disabled(!can_prev);
        }
        if let Some(next) = &self.next {
            next.set_disabled(!can_next);
        }
    }

    fn scroll_to(&self, target: Option<usize>) -> bool {
        let Some(index) = target else {
            return false;
        };
        if let Some(section) = self.sections.get(index) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            section.scroll_into_view_with_scroll_into_view_options(&options);
        }
        log::debug!("navigate -> section {index}");
        self.sync();
        true
    }

    fn on_entries(&self, entries: js_sys::Array) {
        let events = entries.iter().filter_map(|entry| {
            let entry = entry.dyn_into::<IntersectionObserverEntry>().ok()?;
            let index = entry
                .target()
                .get_attribute(INDEX_ATTR)?
                .parse::<usize>()
                .ok()?;
            Some(VisibilityEvent {
                index,
                ratio: entry.intersection_ratio(),
                intersecting: entry.is_intersecting(),
            })
        });
        let changed = self.tracker.borrow_mut().observe(events);
        if changed {
            self.sync();
        }
    }
}

pub struct SectionNav {
    view: NavView,
    _observer: Observer,
    _listeners: Vec<EventListener>,
}

impl SectionNav {
    /// Returns `None` when the page has no tracked sections.
    pub fn mount(document: &Document, config: &SiteConfig) -> Result<Option<Self>, JsValue> {
        let sections = dom::query_all(document, "[data-section]")?;
        if sections.is_empty() {
            log::debug!("no [data-section] blocks; section nav not mounted");
            return Ok(None);
        }
        for (i, section) in sections.iter().enumerate() {
            section.set_attribute(INDEX_ATTR, &i.to_string())?;
        }
        let tracker = SectionTracker::new(sections.len(), config.visibility_threshold)
            .map_err(dom::js_error)?;

        let dots = dom::query_all(document, "[data-nav-dot]")?
            .into_iter()
            .filter_map(|dot| {
                let index = dot.get_attribute("data-nav-dot")?.parse::<usize>().ok()?;
                Some((index, dot))
            })
            .collect::<Vec<_>>();

        let view = NavView {
            tracker: Rc::new(RefCell::new(tracker)),
            sections: sections.into(),
            dots: dots.into(),
            prev: dom::by_id(document, "nav-prev"),
            next: dom::by_id(document, "nav-next"),
        };

        let observer = {
            let observed = view.clone();
            Observer::new(config.visibility_threshold, &view.sections, move |entries, _| {
                observed.on_entries(entries)
            })?
        };

        let mut listeners = Vec::new();
        for (index, dot) in view.dots.iter() {
            let view = view.clone();
            let index = *index;
            listeners.push(EventListener::new(dot, "click", move |_| {
                let target = view.tracker.borrow_mut().jump_to(index);
                view.scroll_to(target);
            })?);
        }
        for (button, direction) in [(&view.prev, Direction::Prev), (&view.next, Direction::Next)] {
            if let Some(button) = button {
                let view = view.clone();
                listeners.push(EventListener::new(button, "click", move |_| {
                    let target = view.tracker.borrow_mut().navigate(direction);
                    view.scroll_to(target);
                })?);
            }
        }

        view.sync();
        log::info!("section nav mounted over {} sections", view.sections.len());
        Ok(Some(Self {
            view,
            _observer: observer,
            _listeners: listeners,
        }))
    }

    pub fn active_index(&self) -> usize {
        self.view.tracker.borrow().active_index()
    }

    pub fn go_to(&self, index: usize) -> bool {
        let target = self.view.tracker.borrow_mut().jump_to(index);
        self.view.scroll_to(target)
    }

    pub fn go_relative(&self, delta: i32) -> bool {
        let target = self.view.tracker.borrow_mut().go_relative(delta);
        self.view.scroll_to(target)
    }
}
