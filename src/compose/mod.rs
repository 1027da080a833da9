//! Layer composition for the watermark and OGP tools.
//!
//! # Features
//!
//! - **Proportional watermarking**: logo sized and inset relative to the
//!   longer side of the base image, anchored bottom-right
//! - **OGP cards**: background, a centered row of element icons, a logo and
//!   an optional caption on a fixed-size canvas
//! - **Deterministic geometry**: all placements use truncating integer math
//!
//! # Layer order
//!
//! Layers are drawn strictly bottom to top: background (or base image),
//! elements left to right, logo, text.

pub mod asset;
pub mod compositor;
pub mod layout;
pub mod pipeline;
pub mod resize;
pub mod text;

// Re-export main types for convenience
pub use asset::{load_font, load_image, LoadedImage, SourceType};
pub use compositor::{apply_opacity, blend, draw_over, mask_alpha, Compositor, Layer};
pub use layout::{
    bottom_right_placement, center_offset, overlay_geometry, row_layout, LayoutSpec,
    OverlayGeometry, Point, RowLayout,
};
pub use pipeline::{
    compose_ogp, compose_watermark, parse_element_list, ComposedCanvas, OgpAssets, OgpRequest,
    Stage,
};
pub use resize::{center_crop, fit_by_orientation, ResizeFilter};
pub use text::{measure_text, parse_hex_color, render_text, Color, FontFace};
