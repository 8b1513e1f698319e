use serde::{Deserialize, Serialize};

/// Which state slot of a stateful option is effective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    #[default]
    All,
    Selected,
    Unselected,
    Hovered,
    Disabled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    #[default]
    Fixed,
    Databound,
}

/// What a tile shows; one value for the whole strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    #[default]
    Empty,
    Text,
    Icon,
    TextAndIcon,
}

impl ContentFormat {
    pub fn from_flags(text_show: bool, icon_show: bool) -> Self {
        match (text_show, icon_show) {
            (true, true) => ContentFormat::TextAndIcon,
            (true, false) => ContentFormat::Text,
            (false, true) => ContentFormat::Icon,
            (false, false) => ContentFormat::Empty,
        }
    }

    pub fn has_text(self) -> bool {
        matches!(self, ContentFormat::Text | ContentFormat::TextAndIcon)
    }

    pub fn has_icon(self) -> bool {
        matches!(self, ContentFormat::Icon | ContentFormat::TextAndIcon)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileLayout {
    #[default]
    Horizontal,
    Vertical,
    Grid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMethod {
    #[default]
    Auto,
    Fixed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileShape {
    #[default]
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "parallelogram")]
    Parallelogram,
    #[serde(rename = "chevron")]
    Chevron,
    #[serde(rename = "ellipse")]
    Ellipse,
    #[serde(rename = "pentagon")]
    Pentagon,
    #[serde(rename = "hexagon")]
    Hexagon,
    #[serde(rename = "tab_cutCorner")]
    TabCutCorner,
    #[serde(rename = "tab_cutCorners")]
    TabCutCorners,
}

impl TileShape {
    pub fn name(self) -> &'static str {
        match self {
            TileShape::Rectangle => "rectangle",
            TileShape::Parallelogram => "parallelogram",
            TileShape::Chevron => "chevron",
            TileShape::Ellipse => "ellipse",
            TileShape::Pentagon => "pentagon",
            TileShape::Hexagon => "hexagon",
            TileShape::TabCutCorner => "tab_cutCorner",
            TileShape::TabCutCorners => "tab_cutCorners",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPlacement {
    #[default]
    Left,
    Above,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_format_follows_show_flags() {
        assert_eq!(ContentFormat::from_flags(false, false), ContentFormat::Empty);
        assert_eq!(ContentFormat::from_flags(true, false), ContentFormat::Text);
        assert_eq!(ContentFormat::from_flags(false, true), ContentFormat::Icon);
        assert_eq!(ContentFormat::from_flags(true, true), ContentFormat::TextAndIcon);
    }

    #[test]
    fn states_use_host_names() {
        let s: InteractionState = serde_json::from_str("\"hovered\"").unwrap();
        assert_eq!(s, InteractionState::Hovered);
        assert_eq!(
            serde_json::to_string(&TileShape::TabCutCorners).unwrap(),
            "\"tab_cutCorners\""
        );
    }
}
