use std::cell::RefCell;
use std::rc::Rc;

use buttonstrip_core::Visual;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::canvas::CanvasSurface;
use crate::host::{HostQueue, JsHost};

/// Runtime state of one mounted visual, shared between the exported handle
/// and the canvas event closures.
pub struct State {
    pub canvas: HtmlCanvasElement,
    pub visual: Visual<JsHost, CanvasSurface>,
    pub queue: HostQueue,
}

pub type SharedState = Rc<RefCell<State>>;

/// Run `f` on the state, then dispatch queued host calls once the borrow is
/// released and redraw if a selection went out. A call made while the state
/// is busy (the host calling back synchronously) is rejected instead of
/// panicking.
pub fn with_state<R>(state: &SharedState, f: impl FnOnce(&mut State) -> R) -> Result<R, JsValue> {
    let (result, queue) = {
        let mut s = state
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("visual is busy"))?;
        let result = f(&mut s);
        (result, s.queue.clone())
    };
    if queue.flush()
        && let Ok(mut s) = state.try_borrow_mut()
    {
        s.visual.redraw();
    }
    Ok(result)
}
