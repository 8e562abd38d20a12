#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use collapse_viz::wasm::{self, dom::{self, AnimationLoop, EventListener, Interval}};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlButtonElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn click(el: &Element) {
    el.dyn_ref::<HtmlElement>().unwrap().click();
}

fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

fn remove_all(selector: &str) {
    for el in dom::query_all(&document(), selector).unwrap() {
        el.remove();
    }
}

#[wasm_bindgen_test]
fn listener_is_removed_on_drop() {
    let doc = document();
    let button = doc.create_element("button").unwrap();
    doc.body().unwrap().append_child(&button).unwrap();

    let clicks = Rc::new(Cell::new(0));
    let listener = {
        let clicks = Rc::clone(&clicks);
        EventListener::new(&button, "click", move |_| clicks.set(clicks.get() + 1)).unwrap()
    };
    click(&button);
    assert_eq!(clicks.get(), 1);

    drop(listener);
    click(&button);
    assert_eq!(clicks.get(), 1);
    button.remove();
}

#[wasm_bindgen_test]
async fn interval_stops_ticking_on_drop() {
    let ticks = Rc::new(Cell::new(0u32));
    let timer = {
        let ticks = Rc::clone(&ticks);
        Interval::new(10, move || ticks.set(ticks.get() + 1)).unwrap()
    };
    sleep(100).await;
    assert!(ticks.get() > 0, "interval never fired");

    drop(timer);
    let after_drop = ticks.get();
    sleep(100).await;
    assert_eq!(ticks.get(), after_drop);
}

#[wasm_bindgen_test]
async fn animation_loop_stops_on_drop() {
    let frames = Rc::new(Cell::new(0u32));
    let frame_loop = {
        let frames = Rc::clone(&frames);
        AnimationLoop::start(move |_| frames.set(frames.get() + 1)).unwrap()
    };
    for _ in 0..40 {
        if frames.get() > 1 {
            break;
        }
        sleep(50).await;
    }
    assert!(frames.get() > 1, "animation loop did not keep running");

    drop(frame_loop);
    let after_drop = frames.get();
    sleep(200).await;
    assert_eq!(frames.get(), after_drop);
}

#[wasm_bindgen_test]
fn query_all_keeps_document_order() {
    let doc = document();
    let body = doc.body().unwrap();
    for i in 0..3 {
        let el = doc.create_element("aside").unwrap();
        el.set_attribute("data-order-check", "").unwrap();
        el.set_id(&format!("q{i}"));
        body.append_child(&el).unwrap();
    }
    let ids: Vec<String> = dom::query_all(&doc, "[data-order-check]")
        .unwrap()
        .iter()
        .map(|el| el.id())
        .collect();
    assert_eq!(ids, vec!["q0", "q1", "q2"]);
    remove_all("[data-order-check]");
}

/// Three sections, three dots and the prev/next buttons.
fn nav_fixture() -> Element {
    let doc = document();
    remove_all("[data-section], [data-nav-dot], #nav-prev, #nav-next");
    let root = doc.create_element("div").unwrap();
    let mut html = String::from(r#"<button id="nav-prev"></button>"#);
    for i in 0..3 {
        html.push_str(&format!(r#"<button data-nav-dot="{i}"></button>"#));
    }
    html.push_str(r#"<button id="nav-next"></button>"#);
    for _ in 0..3 {
        html.push_str(r#"<section data-section style="height: 400px"></section>"#);
    }
    root.set_inner_html(&html);
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

#[wasm_bindgen_test]
fn mounted_nav_follows_clicks_until_teardown() {
    let doc = document();
    let body = doc.body().unwrap();
    let root = nav_fixture();
    // Out-of-range config must not keep the page from mounting.
    body.set_attribute("data-config", r#"{"distortion_default": 120, "unknown": 1}"#)
        .unwrap();

    wasm::main().unwrap();

    let dots = dom::query_all(&doc, "[data-nav-dot]").unwrap();
    let prev: HtmlButtonElement = dom::by_id(&doc, "nav-prev").unwrap();
    let next: HtmlButtonElement = dom::by_id(&doc, "nav-next").unwrap();
    assert_eq!(wasm::active_index(), 0);
    assert!(has_class(&dots[0], "active"));
    assert!(prev.disabled());
    assert!(!next.disabled());

    click(&dots[2]);
    assert_eq!(wasm::active_index(), 2);
    assert!(has_class(&dots[2], "active"));
    assert!(!has_class(&dots[0], "active"));
    assert!(!prev.disabled());
    assert!(next.disabled());

    click(&prev);
    assert_eq!(wasm::active_index(), 1);
    assert!(wasm::go_relative(1));
    assert_eq!(wasm::active_index(), 2);
    assert!(!wasm::go_to(3));
    assert_eq!(wasm::active_index(), 2);

    wasm::teardown();
    assert_eq!(wasm::active_index(), 0);
    assert!(!wasm::go_to(1));
    assert!(!wasm::go_relative(-1));

    click(&dots[1]);
    assert!(!has_class(&dots[1], "active"));
    assert!(has_class(&dots[2], "active"));

    body.remove_attribute("data-config").unwrap();
    root.remove();
}

#[wasm_bindgen_test]
fn navigation_exports_are_inert_without_sections() {
    wasm::teardown();
    assert_eq!(wasm::active_index(), 0);
    assert!(!wasm::go_to(1));
    assert!(!wasm::go_relative(1));
}

#[wasm_bindgen_test]
fn set_attr_writes_and_tolerates_bad_names() {
    let el = document().create_element("button").unwrap();
    dom::set_attr(&el, "aria-pressed", "true");
    assert_eq!(el.get_attribute("aria-pressed").as_deref(), Some("true"));

    dom::set_attr(&el, "not a name", "x");
    assert!(!el.has_attribute("not a name"));
}
