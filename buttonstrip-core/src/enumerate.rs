//! Property-pane enumeration: which persisted properties the host shows for
//! an object given the current settings.

use serde::Serialize;
use serde_json::Value;

use crate::enums::{ContentSource, SizingMethod, TileLayout};
use crate::property::PropertyBag;
use crate::resolve::enumerate_state_properties;
use crate::settings::{
    BGIMG, CONTENT, CONTENT_ALIGNMENT, EFFECT, ICON, LAYOUT, PRESET_STYLE, TEXT, TILE_FILL,
    TILE_STROKE, VisualSettings,
};
use crate::state_keys::group_property_names;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInstance {
    pub object_name: String,
    pub properties: PropertyBag,
    pub selector: Option<Value>,
}

const EFFECTS: [&str; 4] = ["gradient", "shadow", "glow", "lighting"];
const FIXED_SIZE_ONLY: [&str; 3] = ["tileWidth", "tileHeight", "tileAlignment"];

/// Options without state variants, always shown.
fn plain_options(group: &PropertyBag) -> PropertyBag {
    group_property_names(group.keys())
        .into_iter()
        .filter(|key| !key.is_stateful())
        .filter_map(|key| {
            let name = key.all?;
            let value = group.get(&name)?.clone();
            Some((name, value))
        })
        .collect()
}

/// Trailing number of a numbered slot (`text7` -> 7).
fn slot_number(key: &str) -> Option<usize> {
    let digits = key.len() - key.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    key[key.len() - digits..].parse().ok()
}

fn styled(group: &PropertyBag) -> PropertyBag {
    let mut properties = plain_options(group);
    properties.extend(enumerate_state_properties(group, None));
    properties
}

fn effect(group: &PropertyBag) -> PropertyBag {
    let mut properties = PropertyBag::new();
    let enabled = |name: &str| group.get(name).and_then(Value::as_bool).unwrap_or(false);
    for key in ["shapeRoundedCornerRadius", "state", "hoverStyling"] {
        if let Some(v) = group.get(key) {
            properties.insert(key.to_string(), v.clone());
        }
    }
    for name in EFFECTS {
        if let Some(v) = group.get(name) {
            properties.insert(name.to_string(), v.clone());
        }
        if !enabled(name) {
            continue;
        }
        if name == "gradient"
            && let Some(v) = group.get("reverseGradient")
        {
            properties.insert("reverseGradient".to_string(), v.clone());
        }
        properties.extend(enumerate_state_properties(group, Some(name)));
    }
    properties
}

fn layout(settings: &VisualSettings, group: &PropertyBag) -> PropertyBag {
    let layout = settings.layout();
    let shape = layout.tile_shape.name();
    group
        .iter()
        .filter(|(key, _)| {
            !(key.ends_with("Angle") || key.ends_with("Length"))
                || **key == format!("{shape}Angle")
                || **key == format!("{shape}Length")
        })
        .filter(|(key, _)| {
            layout.sizing_method == SizingMethod::Fixed || !FIXED_SIZE_ONLY.contains(&key.as_str())
        })
        .filter(|(key, _)| layout.tile_layout == TileLayout::Grid || key.as_str() != "tilesPerRow")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn content(settings: &VisualSettings, group: &PropertyBag) -> PropertyBag {
    let content = settings.content();
    let n = content.count();
    group
        .iter()
        .filter(|(key, _)| {
            !(content.source == ContentSource::Databound
                && (key.starts_with("text") || key.starts_with("icon") || key.as_str() == "n"))
        })
        .filter(|(key, _)| {
            !(content.source == ContentSource::Fixed
                && !content.icons
                && key.starts_with("icon")
                && key.as_str() != "icons")
        })
        .filter(|(key, _)| slot_number(key).is_none_or(|i| i <= n))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn bgimg(settings: &VisualSettings, group: &PropertyBag) -> PropertyBag {
    let show = settings.flag(BGIMG, "show");
    let n = settings.content().count();
    group
        .iter()
        .filter(|(key, _)| match slot_number(key) {
            Some(i) => show && i <= n,
            None => true,
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Instances the property pane shows for `object_name`.
pub fn enumerate_object_instances(settings: &VisualSettings, object_name: &str) -> Vec<ObjectInstance> {
    let empty = PropertyBag::new();
    let group = settings.object(object_name).unwrap_or(&empty);
    let properties = match object_name {
        TILE_FILL | TILE_STROKE | TEXT | ICON | CONTENT_ALIGNMENT => styled(group),
        EFFECT => effect(group),
        LAYOUT => layout(settings, group),
        CONTENT => content(settings, group),
        BGIMG => bgimg(settings, group),
        PRESET_STYLE => group.clone(),
        _ => PropertyBag::new(),
    };
    vec![ObjectInstance {
        object_name: object_name.to_string(),
        properties,
        selector: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(settings: &VisualSettings, object: &str) -> Vec<String> {
        enumerate_object_instances(settings, object)
            .remove(0)
            .properties
            .into_keys()
            .collect()
    }

    #[test]
    fn styled_group_shows_plain_options_and_configured_slot() {
        let mut settings = VisualSettings::default();
        settings.set(TEXT, "state", json!("hovered"));
        assert_eq!(
            keys(&settings, TEXT),
            [
                "show",
                "state",
                "hoverStyling",
                "colorHover",
                "transparencyHover",
                "fontSizeHover",
                "fontFamilyHover"
            ]
        );
    }

    #[test]
    fn effect_options_appear_when_enabled() {
        let mut settings = VisualSettings::default();
        assert_eq!(
            keys(&settings, EFFECT),
            [
                "shapeRoundedCornerRadius",
                "state",
                "hoverStyling",
                "gradient",
                "shadow",
                "glow",
                "lighting"
            ]
        );
        settings.set(EFFECT, "glow", json!(true));
        settings.set(EFFECT, "state", json!("selected"));
        let shown = keys(&settings, EFFECT);
        assert!(shown.contains(&"glowColorSelected".to_string()));
        assert!(shown.contains(&"glowStrengthSelected".to_string()));
        assert!(!shown.iter().any(|k| k.starts_with("shadowColor")));
    }

    #[test]
    fn layout_hides_options_of_other_modes() {
        let mut settings = VisualSettings::default();
        let shown = keys(&settings, LAYOUT);
        assert!(!shown.iter().any(|k| k.ends_with("Angle") || k.ends_with("Length")));
        assert!(!shown.contains(&"tileWidth".to_string()));
        assert!(!shown.contains(&"tilesPerRow".to_string()));

        settings.set(LAYOUT, "tileShape", json!("chevron"));
        settings.set(LAYOUT, "sizingMethod", json!("fixed"));
        settings.set(LAYOUT, "tileLayout", json!("grid"));
        let shown = keys(&settings, LAYOUT);
        assert!(shown.contains(&"chevronAngle".to_string()));
        assert!(!shown.contains(&"hexagonAngle".to_string()));
        assert!(shown.contains(&"tileWidth".to_string()));
        assert!(shown.contains(&"tilesPerRow".to_string()));
    }

    #[test]
    fn content_slots_follow_source_icons_and_count() {
        let mut settings = VisualSettings::default();
        settings.set(CONTENT, "n", json!(2));
        assert_eq!(
            keys(&settings, CONTENT),
            ["source", "n", "icons", "multiselect", "text1", "text2"]
        );
        settings.set(CONTENT, "icons", json!(true));
        assert!(keys(&settings, CONTENT).contains(&"icon2".to_string()));
        settings.set(CONTENT, "source", json!("databound"));
        assert_eq!(keys(&settings, CONTENT), ["source", "multiselect"]);
    }

    #[test]
    fn background_images_need_show() {
        let mut settings = VisualSettings::default();
        assert_eq!(keys(&settings, BGIMG), ["show"]);
        settings.set(BGIMG, "show", json!(true));
        assert_eq!(keys(&settings, BGIMG).len(), 6);
    }

    #[test]
    fn unknown_object_is_empty() {
        let out = enumerate_object_instances(&VisualSettings::default(), "legend");
        assert_eq!(out.len(), 1);
        assert!(out[0].properties.is_empty());
    }
}
