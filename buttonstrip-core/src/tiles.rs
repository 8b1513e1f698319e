use serde::Serialize;

use crate::enums::{ContentFormat, ContentSource, TileShape};
use crate::host::{ColumnRole, DataView, SelectionId, Viewport, VisualHost};
use crate::layout::Rect;
use crate::property::value_to_text;
use crate::selection::SelectionState;
use crate::settings::{BGIMG, CONTENT, ICON, TEXT, VisualSettings};
use crate::style::TileStyle;

/// View model of one tile for a single render pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    pub index: usize,
    pub text: Option<String>,
    pub icon_url: Option<String>,
    pub background_image_url: Option<String>,
    pub content_format: ContentFormat,
    pub is_selected: bool,
    pub is_hovered: bool,
    /// Only set for data-bound tiles.
    pub selection_id: Option<SelectionId>,
}

/// A tile placed and styled, ready to draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTile {
    pub record: TileRecord,
    pub frame: Rect,
    pub style: TileStyle,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub shape: TileShape,
    /// Angle or cut length of the current shape, when it has one.
    pub shape_parameter: Option<f64>,
    pub tiles: Vec<RenderTile>,
}

impl RenderFrame {
    /// Topmost tile under `(x, y)`.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<usize> {
        self.tiles
            .iter()
            .rev()
            .find(|t| t.frame.contains(x, y))
            .map(|t| t.record.index)
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Build the ordered tile records for the current settings.
///
/// Fixed content produces `content.n` tiles from the numbered `text`/`icon`
/// and `bgimg.img` slots. Bound content produces one tile per row of the
/// longest bound column and refreshes the bound selection from the host;
/// its icon and background columns follow `icon.show` and `bgimg.show`.
pub fn build_tile_records<H: VisualHost + ?Sized>(
    settings: &VisualSettings,
    data_view: Option<&DataView>,
    selection: &mut SelectionState,
    hovered_index: Option<usize>,
    host: &H,
) -> Vec<TileRecord> {
    let show_icon = settings.flag(ICON, "show");
    let content_format = ContentFormat::from_flags(settings.flag(TEXT, "show"), show_icon);
    let content = settings.content();
    let show_bgimg = settings.flag(BGIMG, "show");

    match content.source {
        ContentSource::Fixed => (0..content.count())
            .map(|i| TileRecord {
                index: i,
                text: settings.numbered_slot(CONTENT, "text", i + 1),
                icon_url: if content.icons {
                    non_empty(settings.numbered_slot(CONTENT, "icon", i + 1))
                } else {
                    None
                },
                background_image_url: if show_bgimg {
                    non_empty(settings.numbered_slot(BGIMG, "img", i + 1))
                } else {
                    None
                },
                content_format,
                is_selected: selection.unbound.contains(i),
                is_hovered: hovered_index == Some(i),
                selection_id: None,
            })
            .collect(),
        ContentSource::Databound => {
            let Some(data_view) = data_view else {
                return Vec::new();
            };
            if !selection.refresh_bound(&host.selection_ids()) {
                tracing::debug!("selection snapshot incomplete, keeping previous keys");
            }
            let cell = |role: ColumnRole, row: usize| {
                data_view
                    .column(role)
                    .and_then(|c| c.values.get(row))
                    .and_then(value_to_text)
            };
            (0..data_view.row_count())
                .map(|row| {
                    let id = host.create_selection_id(row);
                    TileRecord {
                        index: row,
                        text: cell(ColumnRole::Text, row),
                        icon_url: if show_icon {
                            non_empty(cell(ColumnRole::IconUrl, row))
                        } else {
                            None
                        },
                        background_image_url: if show_bgimg {
                            non_empty(cell(ColumnRole::BackgroundImageUrl, row))
                        } else {
                            None
                        },
                        content_format,
                        is_selected: selection.is_bound_selected(&id),
                        is_hovered: hovered_index == Some(row),
                        selection_id: Some(id),
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::CategoryColumn;
    use crate::persist::PersistenceDiff;
    use serde_json::json;

    #[derive(Default)]
    struct StaticHost {
        selected: Vec<SelectionId>,
    }

    impl VisualHost for StaticHost {
        fn create_selection_id(&self, row: usize) -> SelectionId {
            SelectionId::new(format!("row-{row}"))
        }

        fn selection_ids(&self) -> Vec<SelectionId> {
            self.selected.clone()
        }

        fn select(&mut self, _id: &SelectionId, _multiselect: bool) {}

        fn persist_properties(&mut self, _writes: &[PersistenceDiff]) {}
    }

    fn fixed_settings() -> VisualSettings {
        VisualSettings::parse(Some(&json!({
            "content": { "source": "fixed", "n": 3, "text1": "A", "text2": "B", "text3": "C" }
        })))
        .unwrap()
    }

    #[test]
    fn fixed_content_yields_numbered_texts_in_order() {
        let mut selection = SelectionState::default();
        let tiles = build_tile_records(
            &fixed_settings(),
            None,
            &mut selection,
            None,
            &StaticHost::default(),
        );
        let texts: Vec<_> = tiles.iter().map(|t| t.text.as_deref().unwrap()).collect();
        assert_eq!(texts, ["A", "B", "C"]);
        assert!(tiles.iter().all(|t| !t.is_selected && !t.is_hovered));
        assert!(tiles.iter().enumerate().all(|(i, t)| t.index == i));
        assert!(tiles.iter().all(|t| t.content_format == ContentFormat::Text));
    }

    #[test]
    fn fixed_count_is_not_capped_by_slots() {
        let mut settings = fixed_settings();
        settings.set(CONTENT, "n", json!(14));
        let mut selection = SelectionState::default();
        selection.unbound.select(12, false);
        let tiles = build_tile_records(&settings, None, &mut selection, Some(13), &StaticHost::default());
        assert_eq!(tiles.len(), 14);
        assert_eq!(tiles[11].text, None);
        assert!(tiles[12].is_selected);
        assert!(tiles[13].is_hovered);
    }

    #[test]
    fn fixed_icons_and_images_follow_their_toggles() {
        let mut settings = fixed_settings();
        settings.set(CONTENT, "icon1", json!("a.png"));
        settings.set(BGIMG, "img1", json!("bg.png"));
        let mut selection = SelectionState::default();
        let host = StaticHost::default();
        let tiles = build_tile_records(&settings, None, &mut selection, None, &host);
        assert_eq!(tiles[0].icon_url, None);
        assert_eq!(tiles[0].background_image_url, None);

        settings.set(CONTENT, "icons", json!(true));
        settings.set(BGIMG, "show", json!(true));
        let tiles = build_tile_records(&settings, None, &mut selection, None, &host);
        assert_eq!(tiles[0].icon_url.as_deref(), Some("a.png"));
        assert_eq!(tiles[0].background_image_url.as_deref(), Some("bg.png"));
        assert_eq!(tiles[1].icon_url, None);
    }

    #[test]
    fn bound_rows_span_the_longest_column() {
        let mut settings = VisualSettings::default();
        settings.set(CONTENT, "source", json!("databound"));
        settings.set(ICON, "show", json!(true));
        let view = DataView {
            objects: None,
            categories: vec![
                CategoryColumn {
                    role: ColumnRole::Text,
                    values: vec![json!("North"), json!("South")],
                },
                CategoryColumn {
                    role: ColumnRole::IconUrl,
                    values: vec![json!("n.svg"), json!("s.svg"), json!("e.svg")],
                },
            ],
        };
        let host = StaticHost {
            selected: vec![SelectionId::new("row-1")],
        };
        let mut selection = SelectionState::default();
        let tiles = build_tile_records(&settings, Some(&view), &mut selection, Some(0), &host);
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[2].text, None);
        assert_eq!(tiles[2].icon_url.as_deref(), Some("e.svg"));
        assert_eq!(tiles[0].content_format, ContentFormat::TextAndIcon);
        assert!(tiles[0].is_hovered && !tiles[0].is_selected);
        assert!(tiles[1].is_selected);
        assert_eq!(tiles[1].selection_id, Some(SelectionId::new("row-1")));
    }

    #[test]
    fn bound_icons_follow_icon_show() {
        let mut settings = VisualSettings::default();
        settings.set(CONTENT, "source", json!("databound"));
        let view = DataView {
            objects: None,
            categories: vec![
                CategoryColumn {
                    role: ColumnRole::IconUrl,
                    values: vec![json!("n.svg")],
                },
                CategoryColumn {
                    role: ColumnRole::BackgroundImageUrl,
                    values: vec![json!("bg.png")],
                },
            ],
        };
        let host = StaticHost::default();
        let mut selection = SelectionState::default();
        let tiles = build_tile_records(&settings, Some(&view), &mut selection, None, &host);
        assert_eq!(tiles[0].icon_url, None);
        assert_eq!(tiles[0].background_image_url, None);

        settings.set(ICON, "show", json!(true));
        settings.set(BGIMG, "show", json!(true));
        let tiles = build_tile_records(&settings, Some(&view), &mut selection, None, &host);
        assert_eq!(tiles[0].icon_url.as_deref(), Some("n.svg"));
        assert_eq!(tiles[0].background_image_url.as_deref(), Some("bg.png"));
    }

    #[test]
    fn bound_mode_without_data_is_empty() {
        let mut settings = VisualSettings::default();
        settings.set(CONTENT, "source", json!("databound"));
        let mut selection = SelectionState::default();
        assert!(
            build_tile_records(&settings, None, &mut selection, None, &StaticHost::default())
                .is_empty()
        );
    }
}
