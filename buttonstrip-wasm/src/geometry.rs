//! Tile outlines and content placement, in CSS pixels.

use buttonstrip_core::Rect;
use buttonstrip_core::enums::{Alignment, IconPlacement, TileShape};

use crate::constants::{CONTENT_MARGIN, DEFAULT_SHAPE_ANGLE};

#[derive(Clone, Debug, PartialEq)]
pub enum Outline {
    RoundedRect { rect: Rect, radius: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Polygon(Vec<(f64, f64)>),
}

/// Horizontal run of a slanted edge spanning `rise` at `angle` degrees.
fn slant(rise: f64, angle: f64, limit: f64) -> f64 {
    let angle = angle.clamp(1.0, 89.0).to_radians();
    (rise / angle.tan()).clamp(0.0, limit)
}

/// Outline of one tile. `parameter` is the shape's angle (degrees) or cut
/// length (pixels); `radius` only rounds rectangles.
pub fn outline(shape: TileShape, r: Rect, parameter: Option<f64>, radius: f64) -> Outline {
    let (x, y, w, h) = (r.x, r.y, r.width, r.height);
    let angle = parameter.unwrap_or(DEFAULT_SHAPE_ANGLE);
    match shape {
        TileShape::Rectangle => Outline::RoundedRect {
            rect: r,
            radius: radius.clamp(0.0, w.min(h) / 2.0),
        },
        TileShape::Ellipse => Outline::Ellipse {
            cx: x + w / 2.0,
            cy: y + h / 2.0,
            rx: w / 2.0,
            ry: h / 2.0,
        },
        TileShape::Parallelogram => {
            let off = slant(h, angle, w / 2.0);
            Outline::Polygon(vec![(x + off, y), (x + w, y), (x + w - off, y + h), (x, y + h)])
        }
        TileShape::Chevron => {
            let d = slant(h / 2.0, angle, w / 2.0);
            Outline::Polygon(vec![
                (x, y),
                (x + w - d, y),
                (x + w, y + h / 2.0),
                (x + w - d, y + h),
                (x, y + h),
                (x + d, y + h / 2.0),
            ])
        }
        TileShape::Pentagon => {
            let d = slant(h / 2.0, angle, w / 2.0);
            Outline::Polygon(vec![
                (x, y),
                (x + w - d, y),
                (x + w, y + h / 2.0),
                (x + w - d, y + h),
                (x, y + h),
            ])
        }
        TileShape::Hexagon => {
            let d = slant(h / 2.0, angle, w / 2.0);
            Outline::Polygon(vec![
                (x + d, y),
                (x + w - d, y),
                (x + w, y + h / 2.0),
                (x + w - d, y + h),
                (x + d, y + h),
                (x, y + h / 2.0),
            ])
        }
        TileShape::TabCutCorner | TileShape::TabCutCorners => {
            let l = parameter.unwrap_or(0.0).clamp(0.0, w.min(h) / 2.0);
            let mut points = vec![(x, y + l), (x + l, y)];
            if shape == TileShape::TabCutCorners {
                points.extend([(x + w - l, y), (x + w, y + l)]);
            } else {
                points.push((x + w, y));
            }
            points.extend([(x + w, y + h), (x, y + h)]);
            Outline::Polygon(points)
        }
    }
}

/// Shrink `r` by `d` on every side.
pub fn inset(r: Rect, d: f64) -> Rect {
    let d = d.max(0.0).min(r.width / 2.0).min(r.height / 2.0);
    Rect {
        x: r.x + d,
        y: r.y + d,
        width: r.width - 2.0 * d,
        height: r.height - 2.0 * d,
    }
}

/// Where the icon and the text go inside a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContentBox {
    pub icon: Option<Rect>,
    /// Left edge and vertical centre of the text run.
    pub text: Option<(f64, f64)>,
}

fn aligned_start(align: Alignment, start: f64, span: f64, used: f64) -> f64 {
    match align {
        Alignment::Left => start + CONTENT_MARGIN,
        Alignment::Center => start + (span - used) / 2.0,
        Alignment::Right => start + span - used - CONTENT_MARGIN,
    }
}

/// Lay out an icon of `(width, padding)` and a text run of
/// `(width, height)` inside `frame`.
pub fn place_content(
    frame: Rect,
    align: Alignment,
    placement: IconPlacement,
    icon: Option<(f64, f64)>,
    text: Option<(f64, f64)>,
) -> ContentBox {
    let mid_y = frame.y + frame.height / 2.0;
    match (icon, text) {
        (None, None) => ContentBox::default(),
        (None, Some((tw, _))) => ContentBox {
            icon: None,
            text: Some((aligned_start(align, frame.x, frame.width, tw), mid_y)),
        },
        (Some((iw, _)), None) => {
            let x = aligned_start(align, frame.x, frame.width, iw);
            ContentBox {
                icon: Some(square(x, mid_y - iw / 2.0, iw)),
                text: None,
            }
        }
        (Some((iw, pad)), Some((tw, th))) => match placement {
            IconPlacement::Left => {
                let x = aligned_start(align, frame.x, frame.width, iw + pad + tw);
                ContentBox {
                    icon: Some(square(x, mid_y - iw / 2.0, iw)),
                    text: Some((x + iw + pad, mid_y)),
                }
            }
            IconPlacement::Above => {
                let top = frame.y + (frame.height - (iw + pad + th)) / 2.0;
                ContentBox {
                    icon: Some(square(
                        aligned_start(align, frame.x, frame.width, iw),
                        top,
                        iw,
                    )),
                    text: Some((
                        aligned_start(align, frame.x, frame.width, tw),
                        top + iw + pad + th / 2.0,
                    )),
                }
            }
        },
    }
}

fn square(x: f64, y: f64, side: f64) -> Rect {
    Rect {
        x,
        y,
        width: side,
        height: side,
    }
}
