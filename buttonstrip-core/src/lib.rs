//! State resolution and persistence logic for a strip of clickable button
//! tiles hosted inside a reporting platform.
//!
//! The host delivers settings and data through [`Visual::update`]; tiles are
//! rebuilt from scratch on every pass, styled per interaction state and
//! handed to a [`DrawingSurface`]. Preset themes are reconciled against the
//! persisted settings and only the properties that differ are written back.

pub mod color;
pub mod enumerate;
pub mod enums;
pub mod error;
pub mod host;
pub mod layout;
pub mod persist;
pub mod preset;
pub mod property;
pub mod resolve;
pub mod selection;
pub mod settings;
pub mod state_keys;
pub mod style;
pub mod tiles;
pub mod visual;

pub use color::Color;
pub use enumerate::{ObjectInstance, enumerate_object_instances};
pub use enums::{ContentFormat, ContentSource, InteractionState, TileShape};
pub use error::{Error, Result};
pub use host::{
    CategoryColumn, ColumnRole, DataView, DrawingSurface, SelectionId, UpdateKind, UpdateOptions,
    Viewport, VisualHost,
};
pub use layout::Rect;
pub use persist::PersistenceDiff;
pub use preset::{PresetStyle, compute_persisted_writes};
pub use property::PropertyBag;
pub use resolve::{enumerate_state_properties, resolve_effective_properties};
pub use selection::{SelectionState, UnboundSelection};
pub use settings::VisualSettings;
pub use state_keys::{PropertyGroupKey, group_property_names};
pub use style::TileStyle;
pub use tiles::{RenderFrame, RenderTile, TileRecord, build_tile_records};
pub use visual::{Effects, Visual};
