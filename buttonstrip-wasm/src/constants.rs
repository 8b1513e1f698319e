/// Drawing constants. Lengths are CSS pixels unless noted otherwise.
/// Gap between tile edge and left/right aligned content.
pub const CONTENT_MARGIN: f64 = 5.0;
/// Shape angle (degrees) when the layout object carries none.
pub const DEFAULT_SHAPE_ANGLE: f64 = 45.0;
/// Share of the tile height covered by the lighting highlight.
pub const LIGHTING_SHARE: f64 = 0.5;
/// Largest backing-store side accepted when syncing to the CSS size.
pub const MAX_CANVAS_PX: f64 = 10000.0;
