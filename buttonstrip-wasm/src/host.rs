//! `VisualHost` backed by a JavaScript host object.
//!
//! The object must provide `createSelectionId(row) -> string`,
//! `getSelectionIds() -> (string | null)[]`, `select(key, multiselect)` and
//! `persistProperties(json)`.

use std::cell::RefCell;
use std::rc::Rc;

use buttonstrip_core::{PersistenceDiff, SelectionId, VisualHost};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

fn call(host: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let f: Function = Reflect::get(host, &JsValue::from_str(method))?.dyn_into()?;
    f.apply(host, &args.iter().collect::<Array>())
}

fn selection_id(value: JsValue) -> SelectionId {
    value.as_string().map(SelectionId::new).unwrap_or_else(SelectionId::pending)
}

enum HostCall {
    Select { key: String, multiselect: bool },
    Persist(Vec<PersistenceDiff>),
}

/// Host calls waiting for the visual state to be released. The host may call
/// back into the visual synchronously from `select` or `persistProperties`,
/// so neither runs while the state is borrowed.
#[derive(Clone)]
pub struct HostQueue {
    host: JsValue,
    pending: Rc<RefCell<Vec<HostCall>>>,
}

impl HostQueue {
    fn push(&self, call: HostCall) {
        self.pending.borrow_mut().push(call);
    }

    /// Dispatch queued calls in order. Returns whether a selection was
    /// handed to the host, in which case the tiles need a redraw.
    pub fn flush(&self) -> bool {
        let calls = self.pending.take();
        let mut selected = false;
        for pending in calls {
            match pending {
                HostCall::Select { key, multiselect } => {
                    let args = [JsValue::from_str(&key), JsValue::from_bool(multiselect)];
                    match call(&self.host, "select", &args) {
                        Ok(_) => selected = true,
                        Err(err) => tracing::warn!(key, ?err, "host rejected select"),
                    }
                }
                HostCall::Persist(writes) => self.persist(&writes),
            }
        }
        selected
    }

    fn persist(&self, writes: &[PersistenceDiff]) {
        if writes.is_empty() {
            return;
        }
        let json = match serde_json::to_string(writes) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(%err, "could not serialise persisted writes");
                return;
            }
        };
        if let Err(err) = call(&self.host, "persistProperties", &[JsValue::from_str(&json)]) {
            tracing::warn!(?err, "host rejected persistProperties");
        }
    }
}

pub struct JsHost {
    host: JsValue,
    queue: HostQueue,
}

impl JsHost {
    pub fn new(host: JsValue) -> Self {
        let queue = HostQueue {
            host: host.clone(),
            pending: Rc::default(),
        };
        Self { host, queue }
    }

    pub fn queue(&self) -> HostQueue {
        self.queue.clone()
    }
}

impl VisualHost for JsHost {
    fn create_selection_id(&self, row: usize) -> SelectionId {
        match call(&self.host, "createSelectionId", &[JsValue::from_f64(row as f64)]) {
            Ok(value) => selection_id(value),
            Err(err) => {
                tracing::warn!(row, ?err, "createSelectionId failed");
                SelectionId::pending()
            }
        }
    }

    fn selection_ids(&self) -> Vec<SelectionId> {
        match call(&self.host, "getSelectionIds", &[]) {
            Ok(value) if Array::is_array(&value) => {
                Array::from(&value).iter().map(selection_id).collect()
            }
            Ok(_) => Vec::new(),
            Err(err) => {
                tracing::warn!(?err, "getSelectionIds failed");
                Vec::new()
            }
        }
    }

    fn select(&mut self, id: &SelectionId, multiselect: bool) {
        let Some(key) = id.key() else {
            tracing::debug!("ignoring click on a tile without a selection key");
            return;
        };
        self.queue.push(HostCall::Select {
            key: key.to_string(),
            multiselect,
        });
    }

    fn persist_properties(&mut self, writes: &[PersistenceDiff]) {
        self.queue.push(HostCall::Persist(writes.to_vec()));
    }
}
