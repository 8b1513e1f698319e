//! Browser bridge: mounts a button strip on a canvas and forwards host
//! callbacks and pointer events to the core [`Visual`].

use std::cell::RefCell;
use std::rc::Rc;

use buttonstrip_core::{UpdateOptions, Visual};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

mod canvas;
mod constants;
mod geometry;
mod host;
mod state;
mod utils;

use canvas::CanvasSurface;
use host::JsHost;
use state::{SharedState, State, with_state};
use utils::{event_canvas_coords, init_tracing};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    init_tracing();
    tracing::info!("button strip module loaded");
    Ok(())
}

fn json_string<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
pub struct ButtonStripVisual {
    state: SharedState,
}

#[wasm_bindgen]
impl ButtonStripVisual {
    /// Mount on `canvas`; `host` is the JavaScript host object.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, host: JsValue) -> Result<ButtonStripVisual, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let host = JsHost::new(host);
        let queue = host.queue();
        let surface = CanvasSurface::new(window, canvas.clone())?;
        let state = Rc::new(RefCell::new(State {
            canvas,
            visual: Visual::new(host, surface),
            queue,
        }));
        attach_ui(state.clone())?;
        Ok(ButtonStripVisual { state })
    }

    /// Host update. `options_json` is a serialised `UpdateOptions`.
    pub fn update(&self, options_json: &str) -> Result<(), JsValue> {
        let options: UpdateOptions = serde_json::from_str(options_json)
            .map_err(|err| JsValue::from_str(&format!("invalid update options: {err}")))?;
        with_state(&self.state, |s| {
            s.visual.update(options);
        })
    }

    /// Property-pane instances for `object_name`, as JSON.
    #[wasm_bindgen(js_name = enumerateObjectInstances)]
    pub fn enumerate_object_instances(&self, object_name: &str) -> Result<String, JsValue> {
        let instances = with_state(&self.state, |s| s.visual.enumerate_object_instances(object_name))?;
        json_string(&instances)
    }

    /// Last drawn frame, as JSON.
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self) -> Result<String, JsValue> {
        let frame = with_state(&self.state, |s| s.visual.frame().clone())?;
        json_string(&frame)
    }
}

fn tile_under_pointer(s: &State, e: &MouseEvent) -> Option<usize> {
    let (x, y) = event_canvas_coords(e, &s.canvas);
    s.visual.tile_at(x, y)
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::debug!(?err, "pointer event dropped");
    }
}

fn attach_ui(state: SharedState) -> Result<(), JsValue> {
    let canvas = state.borrow().canvas.clone();
    {
        let st = state.clone();
        let click = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            report(with_state(&st, |s| {
                if let Some(i) = tile_under_pointer(s, &e) {
                    s.visual.on_click(i);
                }
            }));
        }));
        canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        click.forget();
    }
    {
        let st = state.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            report(with_state(&st, |s| {
                let under = tile_under_pointer(s, &e);
                s.visual.on_pointer_over(under);
            }));
        }));
        canvas.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        mousemove.forget();
    }
    {
        let st = state;
        let mouseleave = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
            report(with_state(&st, |s| {
                s.visual.on_pointer_over(None);
            }));
        }));
        canvas.add_event_listener_with_callback("mouseleave", mouseleave.as_ref().unchecked_ref())?;
        mouseleave.forget();
    }
    Ok(())
}
