use indexmap::IndexMap;
use serde::Serialize;

use crate::color::Color;
use crate::enums::InteractionState;
use crate::property::{PropertyBag, get_bool, get_f64, get_str};
use crate::resolve::resolve_effective_properties;
use crate::settings::{STYLED_OBJECTS, VisualSettings};
use crate::tiles::TileRecord;

/// State a tile is drawn in for one styling group.
pub fn tile_state(record: &TileRecord, hover_styling: bool, any_selected: bool) -> InteractionState {
    if record.is_hovered && hover_styling {
        InteractionState::Hovered
    } else if record.is_selected {
        InteractionState::Selected
    } else if any_selected {
        InteractionState::Unselected
    } else {
        InteractionState::All
    }
}

/// Effective options of every styling group for one tile, keyed by object
/// name then base option name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TileStyle {
    groups: IndexMap<String, PropertyBag>,
}

impl TileStyle {
    pub fn group(&self, object: &str) -> Option<&PropertyBag> {
        self.groups.get(object)
    }

    pub fn str(&self, object: &str, option: &str) -> Option<&str> {
        self.group(object).and_then(|g| get_str(g, option))
    }

    pub fn num(&self, object: &str, option: &str) -> Option<f64> {
        self.group(object).and_then(|g| get_f64(g, option))
    }

    pub fn flag(&self, object: &str, option: &str) -> bool {
        self.group(object).is_some_and(|g| get_bool(g, option))
    }

    pub fn color(&self, object: &str, option: &str) -> Option<Color> {
        self.str(object, option).and_then(|s| Color::parse(s).ok())
    }
}

/// Resolve every styling group for `record`. Plain options come from the
/// `all` resolution; stateful ones are overridden by the tile's state.
pub fn resolve_tile_style(settings: &VisualSettings, record: &TileRecord, any_selected: bool) -> TileStyle {
    let groups = STYLED_OBJECTS
        .iter()
        .filter_map(|object| {
            let group = settings.object(object)?;
            let state = tile_state(record, get_bool(group, "hoverStyling"), any_selected);
            let mut effective = resolve_effective_properties(group, InteractionState::All, None);
            if state != InteractionState::All {
                effective.extend(resolve_effective_properties(group, state, None));
            }
            Some((object.to_string(), effective))
        })
        .collect();
    TileStyle { groups }
}
