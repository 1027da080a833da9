//! Placement geometry for overlays, element rows and text.
//!
//! Every function here is pure integer arithmetic on canvas and overlay
//! dimensions. Divisions truncate toward zero, so identical inputs always
//! produce identical placements regardless of platform.
//!
//! # Example
//!
//! ```ignore
//! use imprint::compose::layout::{bottom_right_placement, overlay_geometry};
//!
//! let geometry = overlay_geometry(1000, 600, 0.2, 0.05);
//! assert_eq!((geometry.width, geometry.margin), (200, 50));
//!
//! let point = bottom_right_placement(1000, 600, geometry.width, 80, geometry.margin);
//! assert_eq!((point.x, point.y), (750, 470));
//! ```

/// Top-left position of a layer on the canvas.
///
/// Coordinates may be negative when the layer hangs off the top or left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and margin of an overlay derived from canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    pub width: u32,
    pub margin: u32,
}

/// Resolved placement of the watermark logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpec {
    pub overlay_width: u32,
    pub margin: u32,
    pub point: Point,
}

impl LayoutSpec {
    /// Anchor an overlay of known height to the bottom-right corner.
    pub fn bottom_right(
        canvas_width: u32,
        canvas_height: u32,
        geometry: OverlayGeometry,
        overlay_height: u32,
    ) -> Self {
        Self {
            overlay_width: geometry.width,
            margin: geometry.margin,
            point: bottom_right_placement(
                canvas_width,
                canvas_height,
                geometry.width,
                overlay_height,
                geometry.margin,
            ),
        }
    }
}

/// Compute overlay width and margin from the longer canvas side.
///
/// Using `max(width, height)` keeps the overlay visually consistent between
/// landscape and portrait images. Both products are truncated.
pub fn overlay_geometry(
    canvas_width: u32,
    canvas_height: u32,
    width_magnification: f64,
    margin_magnification: f64,
) -> OverlayGeometry {
    let reference = canvas_width.max(canvas_height) as f64;
    OverlayGeometry {
        width: scale_truncated(reference, width_magnification),
        margin: scale_truncated(reference, margin_magnification),
    }
}

/// Multiply a dimension by a ratio and truncate, saturating at zero.
pub fn scale_truncated(dimension: f64, magnification: f64) -> u32 {
    let scaled = dimension * magnification;
    if scaled.is_finite() && scaled > 0.0 {
        scaled as u32
    } else {
        0
    }
}

/// Anchor an overlay to the bottom-right corner, inset by `margin`.
///
/// The result is negative when the overlay plus margin exceeds the canvas.
pub fn bottom_right_placement(
    canvas_width: u32,
    canvas_height: u32,
    overlay_width: u32,
    overlay_height: u32,
    margin: u32,
) -> Point {
    let x = canvas_width as i64 - (overlay_width as i64 + margin as i64);
    let y = canvas_height as i64 - (overlay_height as i64 + margin as i64);
    Point::new(saturate_i32(x), saturate_i32(y))
}

/// Offset that centers `inner` inside `outer`, truncated toward zero.
pub fn center_offset(outer: i32, inner: i32) -> i32 {
    (outer - inner) / 2
}

/// Horizontal layout of equally sized elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// X position of the first element.
    pub start_x: i32,
    /// Distance between the left edges of consecutive elements.
    pub step: i32,
    pub count: usize,
}

impl RowLayout {
    /// X position of the element at `index`.
    pub fn x_at(&self, index: usize) -> i32 {
        self.start_x + self.step * index as i32
    }

    /// X positions of every element, left to right.
    pub fn positions(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.count).map(move |i| self.x_at(i))
    }
}

/// Center a row of `count` elements of `element_size` separated by `margin`.
///
/// The row width used for centering is `element_size * count + margin`,
/// which is what the existing OGP layouts were tuned against.
pub fn row_layout(canvas_width: u32, count: usize, element_size: u32, margin: u32) -> RowLayout {
    let row_width = element_size as i64 * count as i64 + margin as i64;
    RowLayout {
        start_x: center_offset(canvas_width as i32, saturate_i32(row_width)),
        step: saturate_i32(element_size as i64 + margin as i64),
        count,
    }
}

/// Vertical baseline for text placed below an element row.
pub fn text_baseline(canvas_height: u32, baseline_offset_y: i32) -> i32 {
    baseline_offset_y + center_offset(canvas_height as i32, baseline_offset_y)
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
