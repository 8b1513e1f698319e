//! Persisted visual settings.
//!
//! Every object the host persists is a flat record composed from named
//! option sets. Stateful options expand to one property per state slot
//! (`color`, `colorSelected`, `colorUnselected`, `colorHover`,
//! `colorDisabled`); numbered options expand to `text1..textN`.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::enums::{Alignment, ContentSource, SizingMethod, TileLayout, TileShape};
use crate::error::{Error, Result};
use crate::persist::PersistenceDiff;
use crate::preset::PresetStyle;
use crate::property::{PropertyBag, get_bool, value_to_text};
use crate::state_keys::StateSlot;

pub const TILE_FILL: &str = "tileFill";
pub const TILE_STROKE: &str = "tileStroke";
pub const TEXT: &str = "text";
pub const ICON: &str = "icon";
pub const LAYOUT: &str = "layout";
pub const CONTENT_ALIGNMENT: &str = "contentAlignment";
pub const EFFECT: &str = "effect";
pub const CONTENT: &str = "content";
pub const BGIMG: &str = "bgimg";
pub const PRESET_STYLE: &str = "presetStyle";

/// Objects whose options vary per interaction state.
pub const STYLED_OBJECTS: [&str; 6] = [
    TILE_FILL,
    TILE_STROKE,
    TEXT,
    ICON,
    CONTENT_ALIGNMENT,
    EFFECT,
];

/// Highest numbered fixed-content slot offered by default.
pub const FIXED_SLOTS: u32 = 10;

#[derive(Clone, Copy, Debug)]
pub enum DefaultValue {
    Bool(bool),
    Number(f64),
    Text(&'static str),
    /// `"<label> <i>"` for numbered options.
    Numbered(&'static str),
}

impl DefaultValue {
    fn to_value(self, index: u32) -> Value {
        match self {
            DefaultValue::Bool(b) => json!(b),
            DefaultValue::Number(n) => json!(n),
            DefaultValue::Text(s) => json!(s),
            DefaultValue::Numbered(label) => json!(format!("{label} {index}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Plain,
    Stateful,
    Numbered,
}

#[derive(Clone, Copy, Debug)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    pub default: DefaultValue,
}

const fn plain(name: &'static str, default: DefaultValue) -> OptionSpec {
    OptionSpec {
        name,
        kind: OptionKind::Plain,
        default,
    }
}

const fn stateful(name: &'static str, default: DefaultValue) -> OptionSpec {
    OptionSpec {
        name,
        kind: OptionKind::Stateful,
        default,
    }
}

const fn numbered(name: &'static str, default: DefaultValue) -> OptionSpec {
    OptionSpec {
        name,
        kind: OptionKind::Numbered,
        default,
    }
}

use DefaultValue::{Bool, Number, Text};

const STATE_SET: &[OptionSpec] = &[
    plain("state", Text("all")),
    plain("hoverStyling", Bool(false)),
];
const SHOW_ON: &[OptionSpec] = &[plain("show", Bool(true))];
const SHOW_OFF: &[OptionSpec] = &[plain("show", Bool(false))];

const FILL_SET: &[OptionSpec] = &[
    stateful("color", Text("#FFFFFF")),
    stateful("transparency", Number(0.0)),
];

const STROKE_SET: &[OptionSpec] = &[
    stateful("color", Text("#252423")),
    stateful("transparency", Number(0.0)),
    stateful("weight", Number(1.0)),
];

const FONT_SET: &[OptionSpec] = &[
    stateful("color", Text("#252423")),
    stateful("transparency", Number(0.0)),
    stateful("fontSize", Number(14.0)),
    stateful("fontFamily", Text("Segoe UI")),
];

const ICON_SET: &[OptionSpec] = &[
    plain("placement", Text("left")),
    stateful("width", Number(30.0)),
    stateful("padding", Number(10.0)),
];

const LAYOUT_SET: &[OptionSpec] = &[
    plain("sizingMethod", Text("auto")),
    plain("tileWidth", Number(150.0)),
    plain("tileHeight", Number(75.0)),
    plain("tileAlignment", Text("center")),
    plain("tileLayout", Text("horizontal")),
    plain("tilesPerRow", Number(3.0)),
    plain("padding", Number(10.0)),
    plain("tileShape", Text("rectangle")),
];

const SHAPE_SET: &[OptionSpec] = &[
    plain("parallelogramAngle", Number(45.0)),
    plain("chevronAngle", Number(45.0)),
    plain("pentagonAngle", Number(45.0)),
    plain("hexagonAngle", Number(45.0)),
    plain("tab_cutCornerLength", Number(10.0)),
    plain("tab_cutCornersLength", Number(10.0)),
];

const ALIGNMENT_SET: &[OptionSpec] = &[stateful("alignment", Text("center"))];

const CORNER_SET: &[OptionSpec] = &[plain("shapeRoundedCornerRadius", Number(0.0))];

const GRADIENT_SET: &[OptionSpec] = &[
    plain("gradient", Bool(false)),
    plain("reverseGradient", Bool(false)),
    stateful("gradientColor", Text("#FFFFFF")),
];

const SHADOW_SET: &[OptionSpec] = &[
    plain("shadow", Bool(false)),
    stateful("shadowColor", Text("#000000")),
    stateful("shadowTransparency", Number(70.0)),
    stateful("shadowDistance", Number(2.0)),
    stateful("shadowStrength", Number(10.0)),
];

const GLOW_SET: &[OptionSpec] = &[
    plain("glow", Bool(false)),
    stateful("glowColor", Text("#41A4FF")),
    stateful("glowTransparency", Number(70.0)),
    stateful("glowStrength", Number(10.0)),
];

const LIGHTING_SET: &[OptionSpec] = &[
    plain("lighting", Bool(false)),
    stateful("lightingColor", Text("#FFFFFF")),
    stateful("lightingTransparency", Number(70.0)),
];

const CONTENT_SET: &[OptionSpec] = &[
    plain("source", Text("fixed")),
    plain("n", Number(5.0)),
    plain("icons", Bool(false)),
    plain("multiselect", Bool(false)),
    numbered("text", DefaultValue::Numbered("Button")),
    numbered("icon", Text("")),
];

const IMAGE_SET: &[OptionSpec] = &[numbered("img", Text(""))];

const PRESET_SET: &[OptionSpec] = &[
    plain("preset", Text("none")),
    plain("color", Text("#41A4FF")),
];

pub struct ObjectSchema {
    pub name: &'static str,
    pub option_sets: &'static [&'static [OptionSpec]],
}

impl ObjectSchema {
    pub fn options(&self) -> impl Iterator<Item = &'static OptionSpec> + '_ {
        self.option_sets.iter().flat_map(|set| set.iter())
    }

    /// Defaults of every property of this object, in schema order.
    pub fn defaults(&self) -> PropertyBag {
        let mut bag = PropertyBag::new();
        for option in self.options() {
            match option.kind {
                OptionKind::Plain => {
                    bag.insert(option.name.to_string(), option.default.to_value(0));
                }
                OptionKind::Stateful => {
                    for slot in StateSlot::ALL_SLOTS {
                        bag.insert(slot.property_name(option.name), option.default.to_value(0));
                    }
                }
                OptionKind::Numbered => {
                    for i in 1..=FIXED_SLOTS {
                        bag.insert(format!("{}{i}", option.name), option.default.to_value(i));
                    }
                }
            }
        }
        bag
    }
}

pub const SCHEMA: &[ObjectSchema] = &[
    ObjectSchema {
        name: TILE_FILL,
        option_sets: &[STATE_SET, FILL_SET],
    },
    ObjectSchema {
        name: TILE_STROKE,
        option_sets: &[STATE_SET, STROKE_SET],
    },
    ObjectSchema {
        name: TEXT,
        option_sets: &[SHOW_ON, STATE_SET, FONT_SET],
    },
    ObjectSchema {
        name: ICON,
        option_sets: &[SHOW_OFF, STATE_SET, ICON_SET],
    },
    ObjectSchema {
        name: LAYOUT,
        option_sets: &[LAYOUT_SET, SHAPE_SET],
    },
    ObjectSchema {
        name: CONTENT_ALIGNMENT,
        option_sets: &[STATE_SET, ALIGNMENT_SET],
    },
    ObjectSchema {
        name: EFFECT,
        option_sets: &[
            STATE_SET,
            CORNER_SET,
            GRADIENT_SET,
            SHADOW_SET,
            GLOW_SET,
            LIGHTING_SET,
        ],
    },
    ObjectSchema {
        name: CONTENT,
        option_sets: &[CONTENT_SET],
    },
    ObjectSchema {
        name: BGIMG,
        option_sets: &[SHOW_OFF, IMAGE_SET],
    },
    ObjectSchema {
        name: PRESET_STYLE,
        option_sets: &[PRESET_SET],
    },
];

pub fn schema(object: &str) -> Option<&'static ObjectSchema> {
    SCHEMA.iter().find(|s| s.name == object)
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentSettings {
    pub source: ContentSource,
    pub n: f64,
    pub icons: bool,
    pub multiselect: bool,
}

impl ContentSettings {
    /// Number of fixed tiles; negative or fractional counts are truncated.
    pub fn count(&self) -> usize {
        if self.n.is_finite() && self.n > 0.0 {
            self.n.floor() as usize
        } else {
            0
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    pub sizing_method: SizingMethod,
    pub tile_width: f64,
    pub tile_height: f64,
    pub tile_alignment: Alignment,
    pub tile_layout: TileLayout,
    pub tiles_per_row: f64,
    pub padding: f64,
    pub tile_shape: TileShape,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PresetStyleSettings {
    pub preset: String,
    pub color: String,
}

impl Default for PresetStyleSettings {
    fn default() -> Self {
        Self {
            preset: "none".to_string(),
            color: "#41A4FF".to_string(),
        }
    }
}

impl PresetStyleSettings {
    pub fn style(&self) -> PresetStyle {
        PresetStyle::from_name(&self.preset)
    }
}

/// All persisted objects of the visual, defaults overlaid with whatever the
/// host delivered.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualSettings {
    objects: IndexMap<String, PropertyBag>,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            objects: SCHEMA
                .iter()
                .map(|s| (s.name.to_string(), s.defaults()))
                .collect(),
        }
    }
}

impl VisualSettings {
    /// Overlay a host settings document (`{"object": {"property": value}}`)
    /// on the defaults. `None` and `null` yield the defaults.
    pub fn parse(document: Option<&Value>) -> Result<Self> {
        let mut settings = Self::default();
        let objects = match document {
            None | Some(Value::Null) => return Ok(settings),
            Some(Value::Object(objects)) => objects,
            Some(other) => return Err(Error::Settings(json_kind(other))),
        };
        for (object, properties) in objects {
            let Value::Object(properties) = properties else {
                return Err(Error::SettingsObject {
                    object: object.clone(),
                });
            };
            let bag = settings.objects.entry(object.clone()).or_default();
            for (key, value) in properties {
                bag.insert(key.clone(), normalize_value(value));
            }
        }
        Ok(settings)
    }

    pub fn object(&self, name: &str) -> Option<&PropertyBag> {
        self.objects.get(name)
    }

    pub fn get(&self, object: &str, property: &str) -> Option<&Value> {
        self.object(object)?.get(property)
    }

    /// Apply persisted writes, as the host does before redelivering.
    pub fn merge(&mut self, writes: &[PersistenceDiff]) {
        for diff in writes {
            let bag = self.objects.entry(diff.object_name.clone()).or_default();
            for (key, value) in &diff.changed_properties {
                bag.insert(key.clone(), value.clone());
            }
        }
    }

    /// Set one property; test and bridge convenience.
    pub fn set(&mut self, object: &str, property: &str, value: Value) {
        self.objects
            .entry(object.to_string())
            .or_default()
            .insert(property.to_string(), value);
    }

    /// Typed view of one object; a malformed object falls back to the
    /// schema defaults.
    fn view<T: DeserializeOwned + Default>(&self, object: &str) -> T {
        let parse = |bag: &PropertyBag| {
            let map: Map<String, Value> =
                bag.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            serde_json::from_value::<T>(Value::Object(map))
        };
        if let Some(bag) = self.object(object) {
            match parse(bag) {
                Ok(view) => return view,
                Err(err) => {
                    tracing::warn!(object, %err, "malformed settings object, using defaults")
                }
            }
        }
        schema(object)
            .and_then(|s| parse(&s.defaults()).ok())
            .unwrap_or_default()
    }

    pub fn content(&self) -> ContentSettings {
        self.view(CONTENT)
    }

    pub fn layout(&self) -> LayoutSettings {
        self.view(LAYOUT)
    }

    pub fn preset_style(&self) -> PresetStyleSettings {
        self.view(PRESET_STYLE)
    }

    pub fn flag(&self, object: &str, property: &str) -> bool {
        self.object(object).is_some_and(|bag| get_bool(bag, property))
    }

    /// Whether hovering a tile changes how anything is drawn.
    pub fn any_hover_styling(&self) -> bool {
        STYLED_OBJECTS.iter().any(|o| self.flag(o, "hoverStyling"))
    }

    /// Numbered fixed-content slot (`text3`, `img7`, ...), 1-based.
    pub fn numbered_slot(&self, object: &str, prefix: &str, index: usize) -> Option<String> {
        self.get(object, &format!("{prefix}{index}"))
            .and_then(value_to_text)
    }
}

/// Hosts deliver fills as `{"solid": {"color": "#..."}}`.
fn normalize_value(value: &Value) -> Value {
    match value.pointer("/solid/color") {
        Some(Value::String(color)) => Value::String(color.clone()),
        _ => value.clone(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
