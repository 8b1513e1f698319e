//! Contracts with the host platform and the drawing surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::persist::PersistenceDiff;
use crate::tiles::RenderFrame;

/// Opaque host selection id. The key can be missing while the host is still
/// resolving it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionId {
    key: Option<String>,
}

impl SelectionId {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    pub fn pending() -> Self {
        Self { key: None }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnRole {
    Text,
    IconUrl,
    BackgroundImageUrl,
}

/// One bound category column; rows align by index across columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub role: ColumnRole,
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataView {
    /// Persisted settings document.
    #[serde(default)]
    pub objects: Option<Value>,
    #[serde(default)]
    pub categories: Vec<CategoryColumn>,
}

impl DataView {
    pub fn column(&self, role: ColumnRole) -> Option<&CategoryColumn> {
        self.categories.iter().find(|c| c.role == role)
    }

    /// Row count: the longest bound column.
    pub fn row_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.values.len())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateKind {
    #[default]
    Data,
    Resize,
    ResizeEnd,
    Style,
    All,
}

impl UpdateKind {
    pub fn is_resize(self) -> bool {
        matches!(self, UpdateKind::Resize | UpdateKind::ResizeEnd)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOptions {
    #[serde(default)]
    pub data_views: Vec<DataView>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default, rename = "type")]
    pub kind: UpdateKind,
}

/// Services the host platform provides.
pub trait VisualHost {
    /// Selection id of a bound category row.
    fn create_selection_id(&self, row: usize) -> SelectionId;

    /// Currently selected ids.
    fn selection_ids(&self) -> Vec<SelectionId>;

    fn select(&mut self, id: &SelectionId, multiselect: bool);

    /// Fire-and-forget; the host redelivers an update afterwards.
    fn persist_properties(&mut self, writes: &[PersistenceDiff]);
}

/// Receives complete frames; every call redraws all tiles.
pub trait DrawingSurface {
    fn render(&mut self, frame: &RenderFrame);
}
