use serde::Serialize;

use crate::enums::{Alignment, SizingMethod, TileLayout};
use crate::host::Viewport;
use crate::settings::LayoutSettings;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

fn tiles_per_row(layout: &LayoutSettings, count: usize) -> usize {
    match layout.tile_layout {
        TileLayout::Horizontal => count,
        TileLayout::Vertical => 1,
        TileLayout::Grid => (layout.tiles_per_row.max(1.0) as usize).min(count),
    }
    .max(1)
}

/// Place `count` tiles row by row inside `viewport`.
pub fn compute_tile_frames(layout: &LayoutSettings, viewport: Viewport, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let per_row = tiles_per_row(layout, count);
    let rows = count.div_ceil(per_row);
    let pad = layout.padding.max(0.0);

    let (width, height) = match layout.sizing_method {
        SizingMethod::Fixed => (layout.tile_width.max(0.0), layout.tile_height.max(0.0)),
        SizingMethod::Auto => (
            ((viewport.width - pad * (per_row - 1) as f64) / per_row as f64).max(0.0),
            ((viewport.height - pad * (rows - 1) as f64) / rows as f64).max(0.0),
        ),
    };

    (0..count)
        .map(|i| {
            let row = i / per_row;
            let col = i % per_row;
            let in_row = per_row.min(count - row * per_row);
            let row_width = width * in_row as f64 + pad * (in_row - 1) as f64;
            let x0 = match (layout.sizing_method, layout.tile_alignment) {
                (SizingMethod::Auto, _) | (_, Alignment::Left) => 0.0,
                (_, Alignment::Center) => ((viewport.width - row_width) / 2.0).max(0.0),
                (_, Alignment::Right) => (viewport.width - row_width).max(0.0),
            };
            Rect {
                x: x0 + col as f64 * (width + pad),
                y: row as f64 * (height + pad),
                width,
                height,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(kind: TileLayout) -> LayoutSettings {
        LayoutSettings {
            tile_layout: kind,
            tiles_per_row: 2.0,
            padding: 10.0,
            tile_width: 100.0,
            tile_height: 40.0,
            ..LayoutSettings::default()
        }
    }

    const VIEW: Viewport = Viewport {
        width: 320.0,
        height: 100.0,
    };

    #[test]
    fn horizontal_auto_splits_width() {
        let frames = compute_tile_frames(&layout(TileLayout::Horizontal), VIEW, 3);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].width, 100.0);
        assert_eq!(frames[2].x, 220.0);
        assert_eq!(frames[1].height, 100.0);
    }

    #[test]
    fn grid_wraps_rows() {
        let frames = compute_tile_frames(&layout(TileLayout::Grid), VIEW, 3);
        assert_eq!(frames[2].x, 0.0);
        assert_eq!(frames[2].y, 55.0);
        assert_eq!(frames[0].height, 45.0);
    }

    #[test]
    fn fixed_rows_are_aligned() {
        let mut l = layout(TileLayout::Vertical);
        l.sizing_method = SizingMethod::Fixed;
        l.tile_alignment = Alignment::Right;
        let frames = compute_tile_frames(&l, VIEW, 2);
        assert_eq!(frames[0].x, 220.0);
        assert_eq!(frames[1].y, 50.0);
        assert!(frames[1].contains(250.0, 60.0));
        assert!(!frames[1].contains(10.0, 60.0));
    }

    #[test]
    fn no_tiles_no_frames() {
        assert!(compute_tile_frames(&layout(TileLayout::Grid), VIEW, 0).is_empty());
    }
}
