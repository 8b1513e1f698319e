use serde_json::Value;

use crate::enums::InteractionState;
use crate::property::PropertyBag;
use crate::state_keys::{PropertyGroupKey, StateSlot, group_property_names};

/// The state a group is configured to display, read from its `state` field.
pub fn configured_state(group: &PropertyBag) -> Option<InteractionState> {
    group
        .get("state")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// Keys with a slot for `state`, paired with that slot's value; empty
/// unless the group has a `state` field.
fn select_slots<'a>(
    group: &'a PropertyBag,
    state: InteractionState,
    prefix: Option<&str>,
) -> Vec<(PropertyGroupKey, &'a Value)> {
    if configured_state(group).is_none() {
        return Vec::new();
    }
    let slot = StateSlot::for_state(state);
    group_property_names(group.keys())
        .into_iter()
        .filter(|key| prefix.is_none_or(|p| key.base.starts_with(p)))
        .filter_map(|key| {
            let value = group.get(key.slot(slot)?)?;
            Some((key, value))
        })
        .collect()
}

/// Effective value of every option of `group` for `state`, keyed by base
/// name. Options without a slot for `state` are left out.
pub fn resolve_effective_properties(
    group: &PropertyBag,
    state: InteractionState,
    prefix: Option<&str>,
) -> PropertyBag {
    select_slots(group, state, prefix)
        .into_iter()
        .map(|(key, value)| (key.base, value.clone()))
        .collect()
}

/// Slots shown in the property pane for the group's configured state, keyed
/// by their persisted property name.
pub fn enumerate_state_properties(group: &PropertyBag, prefix: Option<&str>) -> PropertyBag {
    let Some(state) = configured_state(group) else {
        return PropertyBag::new();
    };
    let slot = StateSlot::for_state(state);
    select_slots(group, state, prefix)
        .into_iter()
        .filter_map(|(key, value)| Some((key.slot(slot)?.to_string(), value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(v: Value) -> PropertyBag {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn resolves_selected_slot_under_base_name() {
        let group = bag(json!({
            "state": "all",
            "fillColor": "#111111",
            "fillColorSelected": "#222222",
            "fillColorHover": "#333333",
        }));
        let out = resolve_effective_properties(&group, InteractionState::Selected, None);
        assert_eq!(out, bag(json!({ "fillColor": "#222222" })));
    }

    #[test]
    fn missing_state_field_resolves_to_nothing() {
        let group = bag(json!({ "fillColor": "#111111" }));
        assert!(resolve_effective_properties(&group, InteractionState::All, None).is_empty());
        assert!(enumerate_state_properties(&group, None).is_empty());
    }

    #[test]
    fn prefix_filters_bases() {
        let group = bag(json!({
            "state": "hovered",
            "glowColor": "#000000",
            "glowColorHover": "#FFFFFF",
            "shadowColorHover": "#123456",
        }));
        let out = resolve_effective_properties(&group, InteractionState::Hovered, Some("glow"));
        assert_eq!(out, bag(json!({ "glowColor": "#FFFFFF" })));
    }

    #[test]
    fn enumeration_uses_configured_state_and_slot_names() {
        let group = bag(json!({
            "state": "unselected",
            "hoverStyling": true,
            "color": "#111111",
            "colorUnselected": "#444444",
        }));
        let out = enumerate_state_properties(&group, None);
        assert_eq!(out, bag(json!({ "colorUnselected": "#444444" })));
    }

    #[test]
    fn all_state_includes_plain_options() {
        let group = bag(json!({ "state": "all", "show": true, "color": "#111111" }));
        let out = resolve_effective_properties(&group, InteractionState::All, None);
        assert_eq!(out.get("show"), Some(&json!(true)));
        assert_eq!(out.get("color"), Some(&json!("#111111")));
        assert_eq!(out.get("state"), Some(&json!("all")));
    }
}
