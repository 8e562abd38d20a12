//! Fixed background layer behind the sections. Purely decorative: if the
//! canvas or WebGL2 is unavailable the page simply runs without it.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, WebGl2RenderingContext as GL};

use super::dom::{self, AnimationLoop, EventListener};

pub struct Background {
    _frames: AnimationLoop,
    _resize: EventListener,
}

impl Background {
    pub fn mount(document: &Document) -> Option<Self> {
        let canvas = dom::by_id::<HtmlCanvasElement>(document, "c")?;
        match Self::start(canvas) {
            Ok(background) => Some(background),
            Err(err) => {
                log::warn!("background disabled: {}", dom::js_value_to_string(&err));
                None
            }
        }
    }

    fn start(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        fit_to_window(&canvas);
        let resize = {
            let canvas = canvas.clone();
            let window = web_sys::window().ok_or("no window")?;
            EventListener::new(&window, "resize", move |_| fit_to_window(&canvas))?
        };

        // Slow drift between deep blue and violet.
        let frames = AnimationLoop::start(move |now_ms| {
            let t = (now_ms / 1000.0) as f32 * 0.15;
            let r = 0.04 + 0.06 * (t.sin() * 0.5 + 0.5);
            let b = 0.12 + 0.08 * ((t * 0.7).cos() * 0.5 + 0.5);
            gl.viewport(0, 0, gl.drawing_buffer_width(), gl.drawing_buffer_height());
            gl.clear_color(r, 0.02, b, 1.0);
            gl.clear(GL::COLOR_BUFFER_BIT);
        })?;

        Ok(Self {
            _frames: frames,
            _resize: resize,
        })
    }
}

fn fit_to_window(canvas: &HtmlCanvasElement) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    canvas.set_width(size(window.inner_width()) as u32);
    canvas.set_height(size(window.inner_height()) as u32);
}
