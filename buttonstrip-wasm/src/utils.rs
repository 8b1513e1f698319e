use std::io;

use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use crate::constants::MAX_CANVAS_PX;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Buffers one formatted tracing event and hands it to the console on drop.
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            log(String::from_utf8_lossy(&self.buf).trim_end());
        }
    }
}

/// Route `tracing` events to the browser console. Safe to call twice.
pub fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    if let Err(err) = result {
        log(&format!("tracing already initialised: {err}"));
    }
}

/// Ensure the canvas backing store matches the CSS size and device pixel
/// ratio; returns the ratio so drawing can stay in CSS pixels.
pub fn sync_canvas_size(window: &Window, canvas: &HtmlCanvasElement) -> f64 {
    let dpr = window.device_pixel_ratio().max(1.0);
    let rect = canvas.get_bounding_client_rect();
    let (css_w, css_h) = (rect.width().max(1.0), rect.height().max(1.0));
    let target_w = (css_w * dpr).round().clamp(1.0, MAX_CANVAS_PX) as u32;
    let target_h = (css_h * dpr).round().clamp(1.0, MAX_CANVAS_PX) as u32;
    if canvas.width() != target_w {
        canvas.set_width(target_w);
    }
    if canvas.height() != target_h {
        canvas.set_height(target_h);
    }
    dpr
}

/// Pointer position relative to the canvas, in CSS pixels.
pub fn event_canvas_coords(e: &MouseEvent, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() > 0.0 {
        (
            e.client_x() as f64 - rect.left(),
            e.client_y() as f64 - rect.top(),
        )
    } else {
        (e.offset_x() as f64, e.offset_y() as f64)
    }
}
