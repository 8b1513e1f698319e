use indexmap::IndexMap;

use crate::enums::InteractionState;

/// Role a property name plays within its group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateSlot {
    All,
    Selected,
    Unselected,
    Hover,
    Disabled,
}

/// Recognised suffixes, tested in this order.
pub const STATE_SUFFIXES: [(StateSlot, &str); 4] = [
    (StateSlot::Selected, "Selected"),
    (StateSlot::Unselected, "Unselected"),
    (StateSlot::Hover, "Hover"),
    (StateSlot::Disabled, "Disabled"),
];

impl StateSlot {
    pub const ALL_SLOTS: [StateSlot; 5] = [
        StateSlot::All,
        StateSlot::Selected,
        StateSlot::Unselected,
        StateSlot::Hover,
        StateSlot::Disabled,
    ];

    pub fn for_state(state: InteractionState) -> Self {
        match state {
            InteractionState::All => StateSlot::All,
            InteractionState::Selected => StateSlot::Selected,
            InteractionState::Unselected => StateSlot::Unselected,
            InteractionState::Hovered => StateSlot::Hover,
            InteractionState::Disabled => StateSlot::Disabled,
        }
    }

    pub fn suffix(self) -> &'static str {
        STATE_SUFFIXES
            .iter()
            .find(|(slot, _)| *slot == self)
            .map_or("", |(_, suffix)| suffix)
    }

    /// Property name of this slot for `base`.
    pub fn property_name(self, base: &str) -> String {
        format!("{base}{}", self.suffix())
    }
}

/// Names of one option across its state slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyGroupKey {
    pub base: String,
    pub all: Option<String>,
    pub selected: Option<String>,
    pub unselected: Option<String>,
    pub hover: Option<String>,
    pub disabled: Option<String>,
}

impl PropertyGroupKey {
    fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            ..Self::default()
        }
    }

    pub fn slot(&self, slot: StateSlot) -> Option<&str> {
        match slot {
            StateSlot::All => self.all.as_deref(),
            StateSlot::Selected => self.selected.as_deref(),
            StateSlot::Unselected => self.unselected.as_deref(),
            StateSlot::Hover => self.hover.as_deref(),
            StateSlot::Disabled => self.disabled.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: StateSlot) -> &mut Option<String> {
        match slot {
            StateSlot::All => &mut self.all,
            StateSlot::Selected => &mut self.selected,
            StateSlot::Unselected => &mut self.unselected,
            StateSlot::Hover => &mut self.hover,
            StateSlot::Disabled => &mut self.disabled,
        }
    }

    /// Whether any state-specific variant exists besides `all`.
    pub fn is_stateful(&self) -> bool {
        self.selected.is_some()
            || self.unselected.is_some()
            || self.hover.is_some()
            || self.disabled.is_some()
    }
}

/// Split a property name into its base and slot.
pub fn split_state_suffix(name: &str) -> (&str, StateSlot) {
    STATE_SUFFIXES
        .iter()
        .find_map(|(slot, suffix)| name.strip_suffix(suffix).map(|base| (base, *slot)))
        .unwrap_or((name, StateSlot::All))
}

/// Group property names by base, in order of first appearance. A repeated
/// (base, slot) pair keeps the later name.
pub fn group_property_names<I, S>(names: I) -> Vec<PropertyGroupKey>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups: IndexMap<String, PropertyGroupKey> = IndexMap::new();
    for name in names {
        let name = name.as_ref();
        let (base, slot) = split_state_suffix(name);
        let key = groups
            .entry(base.to_string())
            .or_insert_with(|| PropertyGroupKey::new(base));
        *key.slot_mut(slot) = Some(name.to_string());
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_fill_colour_variants() {
        let groups = group_property_names(["fillColor", "fillColorSelected", "fillColorHover"]);
        assert_eq!(
            groups,
            vec![PropertyGroupKey {
                base: "fillColor".into(),
                all: Some("fillColor".into()),
                selected: Some("fillColorSelected".into()),
                unselected: None,
                hover: Some("fillColorHover".into()),
                disabled: None,
            }]
        );
    }

    #[test]
    fn unselected_is_not_mistaken_for_selected() {
        assert_eq!(
            split_state_suffix("colorUnselected"),
            ("color", StateSlot::Unselected)
        );
        assert_eq!(split_state_suffix("hoverStyling"), ("hoverStyling", StateSlot::All));
    }

    #[test]
    fn plain_names_form_all_only_groups() {
        let groups = group_property_names(vec!["show".to_string(), "state".to_string()]);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.all.is_some() && !g.is_stateful()));
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let groups = group_property_names(["weightHover", "color", "weight"]);
        let bases: Vec<_> = groups.iter().map(|g| g.base.as_str()).collect();
        assert_eq!(bases, ["weight", "color"]);
    }

    #[test]
    fn slot_names_round_trip() {
        for slot in StateSlot::ALL_SLOTS {
            let name = slot.property_name("glowColor");
            assert_eq!(split_state_suffix(&name), ("glowColor", slot));
        }
    }
}
