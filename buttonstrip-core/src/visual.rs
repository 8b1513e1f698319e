//! Top-level coordinator. Owns every piece of mutable visual state and turns
//! host callbacks into persistence writes and redraws.

use tracing::{debug, info, warn};

use crate::color::Color;
use crate::enums::{ContentSource, InteractionState};
use crate::enumerate::{ObjectInstance, enumerate_object_instances};
use crate::host::{DrawingSurface, UpdateOptions, Viewport, VisualHost};
use crate::layout::compute_tile_frames;
use crate::persist::{PersistenceDiff, merge_batches};
use crate::preset::{PresetStyle, compute_persisted_writes, compute_state_sync_writes};
use crate::selection::SelectionState;
use crate::settings::{LAYOUT, VisualSettings};
use crate::style::{resolve_tile_style, tile_state};
use crate::tiles::{RenderFrame, RenderTile, TileRecord, build_tile_records};

/// What one entry point did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects {
    pub persisted: Vec<PersistenceDiff>,
    pub rendered: bool,
}

pub struct Visual<H, D> {
    host: H,
    surface: D,
    settings: VisualSettings,
    previous_settings: Option<VisualSettings>,
    options: Option<UpdateOptions>,
    hovered_index: Option<usize>,
    selection: SelectionState,
    current_preset: PresetStyle,
    current_preset_color: String,
    tiles: Vec<TileRecord>,
    frame: RenderFrame,
}

impl<H: VisualHost, D: DrawingSurface> Visual<H, D> {
    pub fn new(host: H, surface: D) -> Self {
        Self {
            host,
            surface,
            settings: VisualSettings::default(),
            previous_settings: None,
            options: None,
            hovered_index: None,
            selection: SelectionState::default(),
            current_preset: PresetStyle::None,
            current_preset_color: String::new(),
            tiles: Vec::new(),
            frame: RenderFrame::default(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn settings(&self) -> &VisualSettings {
        &self.settings
    }

    pub fn tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Host update: settings and data changed, or the viewport resized.
    pub fn update(&mut self, options: UpdateOptions) -> Effects {
        let Some(data_view) = options.data_views.first() else {
            debug!("update without a data view, keeping previous render");
            return Effects::default();
        };
        let settings = match VisualSettings::parse(data_view.objects.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(%err, "ignoring update with unreadable settings");
                return Effects::default();
            }
        };

        let persisted = self.persisted_writes(&settings);
        self.previous_settings = Some(settings.clone());
        self.settings = settings;
        let kind = options.kind;
        self.options = Some(options);

        if !persisted.is_empty() {
            info!(objects = persisted.len(), "persisting settings");
            self.host.persist_properties(&persisted);
        }

        let rendered = if kind.is_resize() && !self.tiles.is_empty() {
            self.relayout();
            true
        } else if persisted.is_empty() {
            self.render_pass();
            true
        } else {
            false
        };
        Effects {
            persisted,
            rendered,
        }
    }

    fn persisted_writes(&mut self, settings: &VisualSettings) -> Vec<PersistenceDiff> {
        let preset_style = settings.preset_style();
        let preset = preset_style.style();
        let force = preset != self.current_preset || preset_style.color != self.current_preset_color;
        self.current_preset = preset;
        self.current_preset_color = preset_style.color.clone();

        let mut writes = Vec::new();
        if preset == PresetStyle::None {
            merge_batches(
                &mut writes,
                compute_state_sync_writes(self.previous_settings.as_ref(), settings),
            );
            return writes;
        }
        match Color::parse(&preset_style.color) {
            Ok(base) => merge_batches(
                &mut writes,
                compute_persisted_writes(settings, preset, base, force),
            ),
            Err(err) => warn!(%err, preset = preset.name(), "preset colour unusable, skipping preset"),
        }
        writes
    }

    pub fn enumerate_object_instances(&self, object_name: &str) -> Vec<ObjectInstance> {
        enumerate_object_instances(&self.settings, object_name)
    }

    fn viewport(&self) -> Viewport {
        self.options.as_ref().map(|o| o.viewport).unwrap_or_default()
    }

    /// Rebuild the tiles against the host's current selection and redraw.
    /// Hosts that apply `select` after the click returns call this once the
    /// selection has landed. Nothing happens before the first update.
    pub fn redraw(&mut self) -> Effects {
        if self.options.is_none() {
            return Effects::default();
        }
        self.render_pass();
        Effects {
            persisted: Vec::new(),
            rendered: true,
        }
    }

    /// Rebuild every tile and redraw.
    fn render_pass(&mut self) {
        let data_view = self.options.as_ref().and_then(|o| o.data_views.first());
        self.tiles = build_tile_records(
            &self.settings,
            data_view,
            &mut self.selection,
            self.hovered_index,
            &self.host,
        );
        self.relayout();
    }

    /// Place and style the current tiles, then redraw.
    fn relayout(&mut self) {
        let layout = self.settings.layout();
        let viewport = self.viewport();
        let shape = layout.tile_shape;
        let frames = compute_tile_frames(&layout, viewport, self.tiles.len());
        let any_selected = self.tiles.iter().any(|t| t.is_selected);
        let tiles = self
            .tiles
            .iter()
            .zip(frames)
            .map(|(record, frame)| RenderTile {
                record: record.clone(),
                frame,
                style: resolve_tile_style(&self.settings, record, any_selected),
            })
            .collect();
        let shape_parameter = [format!("{}Angle", shape.name()), format!("{}Length", shape.name())]
            .iter()
            .find_map(|key| self.settings.get(LAYOUT, key).and_then(|v| v.as_f64()));
        self.frame = RenderFrame {
            viewport,
            shape,
            shape_parameter,
            tiles,
        };
        self.surface.render(&self.frame);
    }

    /// Tile click: toggle its selection, then redraw everything.
    pub fn on_click(&mut self, index: usize) -> Effects {
        let Some(tile) = self.tiles.get(index) else {
            debug!(index, "click outside known tiles");
            return Effects::default();
        };
        let content = self.settings.content();
        match (content.source, &tile.selection_id) {
            (ContentSource::Databound, Some(id)) => {
                let id = id.clone();
                self.host.select(&id, content.multiselect);
            }
            _ => self.selection.unbound.select(index, content.multiselect),
        }
        self.render_pass();
        Effects {
            persisted: Vec::new(),
            rendered: true,
        }
    }

    /// Pointer entered tile `index`; replaces any previously hovered tile
    /// in a single transition.
    pub fn on_mouse_enter(&mut self, index: usize) -> Effects {
        if self.hovered_index == Some(index) {
            return Effects::default();
        }
        self.hovered_index = Some(index);
        self.hover_changed()
    }

    pub fn on_mouse_leave(&mut self, index: usize) -> Effects {
        if self.hovered_index != Some(index) {
            return Effects::default();
        }
        self.hovered_index = None;
        self.hover_changed()
    }

    /// Pointer moved over `tile`, or over empty space with `None`. Moving
    /// straight from one tile to another is one transition.
    pub fn on_pointer_over(&mut self, tile: Option<usize>) -> Effects {
        match (tile, self.hovered_index) {
            (Some(i), _) => self.on_mouse_enter(i),
            (None, Some(prev)) => self.on_mouse_leave(prev),
            (None, None) => Effects::default(),
        }
    }

    fn hover_changed(&mut self) -> Effects {
        if !self.settings.any_hover_styling() {
            return Effects::default();
        }
        self.render_pass();
        Effects {
            persisted: Vec::new(),
            rendered: true,
        }
    }

    /// Index of the tile drawn at `(x, y)` in the last frame.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<usize> {
        self.frame.tile_at(x, y)
    }

    /// Effective state of a tile for the given styling object, as drawn.
    pub fn tile_state(&self, index: usize, object: &str) -> Option<InteractionState> {
        let record = self.tiles.get(index)?;
        let hover_styling = self.settings.flag(object, "hoverStyling");
        let any_selected = self.tiles.iter().any(|t| t.is_selected);
        Some(tile_state(record, hover_styling, any_selected))
    }
}
