//! Preset colour themes and the persisted writes they require.

use serde_json::{Value, json};

use crate::color::{Color, WHITE};
use crate::enums::InteractionState;
use crate::persist::{PersistenceDiff, diff_bag};
use crate::property::{PropertyBag, values_match};
use crate::resolve::configured_state;
use crate::settings::{EFFECT, STYLED_OBJECTS, TEXT, TILE_FILL, TILE_STROKE, VisualSettings};
use crate::state_keys::{StateSlot, group_property_names};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresetStyle {
    #[default]
    None,
    Fill,
    Wireframe,
    Glow,
}

impl PresetStyle {
    /// Unrecognised names mean no preset.
    pub fn from_name(name: &str) -> Self {
        match name {
            "fill" => PresetStyle::Fill,
            "wireframe" => PresetStyle::Wireframe,
            "glow" => PresetStyle::Glow,
            _ => PresetStyle::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PresetStyle::None => "none",
            PresetStyle::Fill => "fill",
            PresetStyle::Wireframe => "wireframe",
            PresetStyle::Glow => "glow",
        }
    }
}

/// One colour per state slot, in `StateSlot::ALL_SLOTS` order.
#[derive(Clone, Copy, Debug)]
struct Palette([Color; 5]);

impl Palette {
    fn from_base(c: Color) -> Self {
        Palette([
            c,
            c.saturate_full(),
            c.greyed(),
            c.lighten(0.3),
            c.greyed().lighten(0.5),
        ])
    }

    fn map(self, f: impl Fn(Color) -> Color) -> Self {
        Palette(self.0.map(f))
    }

    fn with(mut self, slot: StateSlot, color: Color) -> Self {
        self.0[slot_index(slot)] = color;
        self
    }
}

fn slot_index(slot: StateSlot) -> usize {
    StateSlot::ALL_SLOTS
        .iter()
        .position(|s| *s == slot)
        .unwrap_or_default()
}

fn put_colors(bag: &mut PropertyBag, base: &str, palette: Palette) {
    for (slot, color) in StateSlot::ALL_SLOTS.into_iter().zip(palette.0) {
        bag.insert(slot.property_name(base), json!(color.to_hex()));
    }
}

fn put_numbers(bag: &mut PropertyBag, base: &str, values: [f64; 5]) {
    for (slot, n) in StateSlot::ALL_SLOTS.into_iter().zip(values) {
        bag.insert(slot.property_name(base), json!(n));
    }
}

fn put(bag: &mut PropertyBag, key: &str, value: Value) {
    bag.insert(key.to_string(), value);
}

fn effects_off(glow: bool) -> PropertyBag {
    let mut effect = PropertyBag::new();
    put(&mut effect, "gradient", json!(false));
    put(&mut effect, "shadow", json!(false));
    put(&mut effect, "glow", json!(glow));
    put(&mut effect, "lighting", json!(false));
    effect
}

/// Every property a preset prescribes, grouped by object. Pure in
/// `(preset, base)`.
pub fn preset_targets(preset: PresetStyle, base: Color) -> Vec<(&'static str, PropertyBag)> {
    let fill_palette = Palette::from_base(base);
    let mut fill = PropertyBag::new();
    let mut stroke = PropertyBag::new();
    let mut text = PropertyBag::new();
    let mut effect;

    match preset {
        PresetStyle::None => return Vec::new(),
        PresetStyle::Fill | PresetStyle::Glow => {
            put_colors(&mut fill, "color", fill_palette);
            put_numbers(&mut fill, "transparency", [0.0; 5]);
            put_colors(&mut stroke, "color", fill_palette.map(|c| c.darken(0.2)));
            put_numbers(&mut stroke, "transparency", [0.0; 5]);
            put_numbers(&mut stroke, "weight", [1.0; 5]);
            put_colors(&mut text, "color", fill_palette.map(|c| c.contrast_text()));
            effect = effects_off(preset == PresetStyle::Glow);
            if preset == PresetStyle::Glow {
                put_colors(&mut effect, "glowColor", fill_palette);
                put_numbers(&mut effect, "glowTransparency", [50.0; 5]);
                put_numbers(&mut effect, "glowStrength", [10.0, 10.0, 10.0, 15.0, 10.0]);
            }
        }
        PresetStyle::Wireframe => {
            let selected = base.saturate_full();
            put_colors(
                &mut fill,
                "color",
                Palette([WHITE; 5]).with(StateSlot::Selected, selected),
            );
            put_numbers(&mut fill, "transparency", [100.0, 0.0, 100.0, 100.0, 100.0]);
            put_colors(&mut stroke, "color", fill_palette);
            put_numbers(&mut stroke, "transparency", [0.0; 5]);
            put_numbers(&mut stroke, "weight", [2.0; 5]);
            put_colors(
                &mut text,
                "color",
                fill_palette.with(StateSlot::Selected, selected.contrast_text()),
            );
            effect = effects_off(false);
        }
    }

    vec![
        (TILE_FILL, fill),
        (TILE_STROKE, stroke),
        (TEXT, text),
        (EFFECT, effect),
    ]
}

/// Writes needed to bring `current` in line with `preset`.
///
/// Only properties whose stored value differs are written, unless
/// `force_full_rewrite` is set (the preset or its colour changed since the
/// last update), in which case every governed property is written.
pub fn compute_persisted_writes(
    current: &VisualSettings,
    preset: PresetStyle,
    base_color: Color,
    force_full_rewrite: bool,
) -> Vec<PersistenceDiff> {
    preset_targets(preset, base_color)
        .into_iter()
        .map(|(object, target)| PersistenceDiff {
            object_name: object.to_string(),
            changed_properties: diff_bag(current.object(object), &target, force_full_rewrite),
        })
        .filter(|diff| !diff.is_empty())
        .collect()
}

/// Propagate options edited in the `all` state to their other slots.
///
/// A stateful option is propagated when its group displays `all` and the
/// `all` value changed since `previous`.
pub fn compute_state_sync_writes(
    previous: Option<&VisualSettings>,
    current: &VisualSettings,
) -> Vec<PersistenceDiff> {
    let Some(previous) = previous else {
        return Vec::new();
    };
    let mut writes = Vec::new();
    for object in STYLED_OBJECTS {
        let (Some(cur), Some(prev)) = (current.object(object), previous.object(object)) else {
            continue;
        };
        if configured_state(cur) != Some(InteractionState::All) {
            continue;
        }
        let mut diff = PersistenceDiff::new(object);
        for key in group_property_names(cur.keys()).into_iter().filter(|k| k.is_stateful()) {
            let Some(all_name) = key.all.as_deref() else {
                continue;
            };
            let (Some(new), Some(old)) = (cur.get(all_name), prev.get(all_name)) else {
                continue;
            };
            if values_match(old, new) {
                continue;
            }
            for slot in &StateSlot::ALL_SLOTS[1..] {
                let Some(name) = key.slot(*slot) else {
                    continue;
                };
                if !cur.get(name).is_some_and(|v| values_match(v, new)) {
                    diff.changed_properties.insert(name.to_string(), new.clone());
                }
            }
        }
        if !diff.is_empty() {
            writes.push(diff);
        }
    }
    writes
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Color = Color::rgb(0x41, 0xA4, 0xFF);

    fn keys(writes: &[PersistenceDiff]) -> Vec<(String, String)> {
        writes
            .iter()
            .flat_map(|d| {
                d.changed_properties
                    .keys()
                    .map(move |k| (d.object_name.clone(), k.clone()))
            })
            .collect()
    }

    #[test]
    fn no_preset_writes_nothing() {
        let settings = VisualSettings::default();
        assert!(compute_persisted_writes(&settings, PresetStyle::None, BASE, true).is_empty());
        assert_eq!(PresetStyle::from_name("sparkly"), PresetStyle::None);
    }

    #[test]
    fn forced_rewrite_covers_every_governed_property() {
        let settings = VisualSettings::default();
        for preset in [PresetStyle::Fill, PresetStyle::Wireframe, PresetStyle::Glow] {
            let writes = compute_persisted_writes(&settings, preset, BASE, true);
            let expected: Vec<(String, String)> = preset_targets(preset, BASE)
                .into_iter()
                .flat_map(|(o, bag)| bag.into_keys().map(move |k| (o.to_string(), k)))
                .collect();
            assert_eq!(keys(&writes), expected, "{preset:?}");
        }
    }

    #[test]
    fn applied_preset_settles() {
        let mut settings = VisualSettings::default();
        let first = compute_persisted_writes(&settings, PresetStyle::Glow, BASE, false);
        assert!(!first.is_empty());
        settings.merge(&first);
        assert!(compute_persisted_writes(&settings, PresetStyle::Glow, BASE, false).is_empty());
    }

    #[test]
    fn only_drifted_properties_are_rewritten() {
        let mut settings = VisualSettings::default();
        settings.merge(&compute_persisted_writes(&settings, PresetStyle::Fill, BASE, true));
        settings.set(TEXT, "colorHover", json!("#000001"));
        let writes = compute_persisted_writes(&settings, PresetStyle::Fill, BASE, false);
        assert_eq!(keys(&writes), [(TEXT.to_string(), "colorHover".to_string())]);
    }

    #[test]
    fn preset_palette_derives_states_from_base() {
        let targets = preset_targets(PresetStyle::Fill, BASE);
        let (_, fill) = &targets[0];
        assert_eq!(fill["color"], json!("#41A4FF"));
        assert_eq!(fill["colorHover"], json!(BASE.lighten(0.3).to_hex()));
        assert_eq!(fill["colorUnselected"], json!(BASE.greyed().to_hex()));
    }

    #[test]
    fn all_state_edit_propagates_to_other_slots() {
        let previous = VisualSettings::default();
        let mut current = previous.clone();
        current.set(TILE_FILL, "color", json!("#FF0000"));
        let writes = compute_state_sync_writes(Some(&previous), &current);
        assert_eq!(
            keys(&writes),
            [
                (TILE_FILL.to_string(), "colorSelected".to_string()),
                (TILE_FILL.to_string(), "colorUnselected".to_string()),
                (TILE_FILL.to_string(), "colorHover".to_string()),
                (TILE_FILL.to_string(), "colorDisabled".to_string()),
            ]
        );
        current.merge(&writes);
        assert!(compute_state_sync_writes(Some(&current), &current).is_empty());
    }

    #[test]
    fn case_only_font_edit_propagates() {
        let mut previous = VisualSettings::default();
        previous.set(TEXT, "fontFamily", json!("Bad"));
        let mut current = previous.clone();
        current.set(TEXT, "fontFamily", json!("BAD"));
        let writes = compute_state_sync_writes(Some(&previous), &current);
        assert_eq!(writes.len(), 1);
        assert_eq!(
            writes[0].changed_properties.get("fontFamilyHover"),
            Some(&json!("BAD"))
        );
    }

    #[test]
    fn edits_in_a_specific_state_do_not_propagate() {
        let previous = VisualSettings::default();
        let mut current = previous.clone();
        current.set(TILE_FILL, "state", json!("selected"));
        current.set(TILE_FILL, "color", json!("#FF0000"));
        assert!(compute_state_sync_writes(Some(&previous), &current).is_empty());
        assert!(compute_state_sync_writes(None, &current).is_empty());
    }
}
