use serde::{Deserialize, Serialize};

use crate::property::{PropertyBag, values_match};

/// Property writes for one persisted object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceDiff {
    pub object_name: String,
    pub changed_properties: PropertyBag,
}

impl PersistenceDiff {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            changed_properties: PropertyBag::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed_properties.is_empty()
    }
}

/// Entries of `target` that `current` does not already hold, or all of them
/// when `force` is set.
pub fn diff_bag(current: Option<&PropertyBag>, target: &PropertyBag, force: bool) -> PropertyBag {
    target
        .iter()
        .filter(|(key, value)| {
            force
                || !current
                    .and_then(|bag| bag.get(key.as_str()))
                    .is_some_and(|stored| values_match(stored, value))
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Fold `extra` into `batch`, one entry per object name; later writes win.
pub fn merge_batches(batch: &mut Vec<PersistenceDiff>, extra: Vec<PersistenceDiff>) {
    for diff in extra.into_iter().filter(|d| !d.is_empty()) {
        match batch.iter_mut().find(|d| d.object_name == diff.object_name) {
            Some(existing) => existing.changed_properties.extend(diff.changed_properties),
            None => batch.push(diff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(v: serde_json::Value) -> PropertyBag {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn diff_keeps_only_changed_entries() {
        let current = bag(json!({ "color": "#ffffff", "weight": 1 }));
        let target = bag(json!({ "color": "#FFFFFF", "weight": 2, "transparency": 0 }));
        let out = diff_bag(Some(&current), &target, false);
        assert_eq!(out, bag(json!({ "weight": 2, "transparency": 0 })));
        assert_eq!(diff_bag(Some(&current), &target, true), target);
        assert_eq!(diff_bag(None, &target, false), target);
    }

    #[test]
    fn merging_groups_by_object() {
        let mut batch = vec![PersistenceDiff {
            object_name: "text".into(),
            changed_properties: bag(json!({ "color": "#000000" })),
        }];
        merge_batches(
            &mut batch,
            vec![
                PersistenceDiff {
                    object_name: "text".into(),
                    changed_properties: bag(json!({ "color": "#111111", "fontSize": 12 })),
                },
                PersistenceDiff::new("icon"),
            ],
        );
        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch[0].changed_properties,
            bag(json!({ "color": "#111111", "fontSize": 12 }))
        );
    }
}
