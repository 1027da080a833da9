//! Alpha compositor for blending layers onto a canvas.
//!
//! This module turns a scalar opacity into a uniform translucency mask and
//! blends layers with the Porter-Duff "over" operator.
//!
//! # Features
//!
//! - Linear opacity-to-alpha mapping with clamping
//! - Clipping of layers that hang off any canvas edge
//! - Ordered multi-layer compositing
//!
//! # Example
//!
//! ```ignore
//! use imprint::compose::compositor::{Compositor, Layer};
//! use imprint::compose::layout::Point;
//!
//! let mut compositor = Compositor::new();
//! compositor.add_layer(Layer::new(logo, Point::new(750, 470), 0.5));
//! compositor.apply(&mut canvas);
//! ```

use super::layout::Point;
use image::{Rgba, RgbaImage};

/// An image positioned on the canvas with an extra opacity factor.
#[derive(Clone)]
pub struct Layer {
    /// The layer content (RGBA, straight alpha).
    pub image: RgbaImage,
    /// Top-left corner on the canvas.
    pub position: Point,
    /// Opacity in [0, 1], applied on top of the image's own alpha.
    pub opacity: f64,
}

impl Layer {
    pub fn new(image: RgbaImage, position: Point, opacity: f64) -> Self {
        Self {
            image,
            position,
            opacity,
        }
    }

    /// A fully opaque layer at `position`.
    pub fn opaque(image: RgbaImage, position: Point) -> Self {
        Self::new(image, position, 1.0)
    }
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .field("position", &self.position)
            .field("opacity", &self.opacity)
            .finish()
    }
}

/// Ordered stack of layers applied to a canvas.
#[derive(Debug, Default)]
pub struct Compositor {
    layers: Vec<Layer>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Draw every layer over the canvas in insertion order.
    pub fn apply(&self, canvas: &mut RgbaImage) {
        for layer in &self.layers {
            draw_over(canvas, layer);
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Clamp an opacity value into [0, 1]. NaN is treated as fully transparent.
pub fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        0.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Map an opacity to the alpha of a uniform mask.
///
/// The mapping is linear: the opacity is first mapped from `[1, 0]` onto
/// `[0, 255]` with truncation, and the mask alpha is the complement.
pub fn mask_alpha(opacity: f64) -> u8 {
    let opacity = clamp_opacity(opacity);
    let inverse = (255.0 * (1.0 - opacity)) as i32;
    (255 - inverse).clamp(0, 255) as u8
}

/// Return a copy of `image` with every alpha value scaled by the opacity mask.
pub fn apply_opacity(image: &RgbaImage, opacity: f64) -> RgbaImage {
    let mask = mask_alpha(opacity) as u32;
    let mut out = image.clone();
    if mask == 255 {
        return out;
    }
    for pixel in out.pixels_mut() {
        pixel[3] = ((pixel[3] as u32 * mask + 127) / 255) as u8;
    }
    out
}

/// Blend `overlay` onto a copy of `base` at `position`.
///
/// Neither input is modified. Parts of the overlay outside `base` are
/// clipped.
pub fn blend(base: &RgbaImage, overlay: &RgbaImage, position: Point, opacity: f64) -> RgbaImage {
    let mut canvas = base.clone();
    let masked = apply_opacity(overlay, opacity);
    draw_over(&mut canvas, &Layer::opaque(masked, position));
    canvas
}

/// Draw a layer over the canvas in place, clipped to the canvas bounds.
pub fn draw_over(canvas: &mut RgbaImage, layer: &Layer) {
    let opacity = clamp_opacity(layer.opacity);
    if opacity == 0.0 {
        return;
    }

    let Some(region) = visible_region(canvas, layer) else {
        return;
    };

    for ty in region.y_start..region.y_end {
        for tx in region.x_start..region.x_end {
            let sx = (tx - layer.position.x) as u32;
            let sy = (ty - layer.position.y) as u32;

            let src = *layer.image.get_pixel(sx, sy);
            let dst = canvas.get_pixel_mut(tx as u32, ty as u32);
            *dst = blend_pixels(*dst, src, opacity);
        }
    }
}

struct Region {
    x_start: i32,
    y_start: i32,
    x_end: i32,
    y_end: i32,
}

/// Intersection of the layer rectangle with the canvas, in canvas coordinates.
fn visible_region(canvas: &RgbaImage, layer: &Layer) -> Option<Region> {
    let canvas_w = canvas.width() as i64;
    let canvas_h = canvas.height() as i64;
    let x = layer.position.x as i64;
    let y = layer.position.y as i64;

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + layer.image.width() as i64).min(canvas_w);
    let y_end = (y + layer.image.height() as i64).min(canvas_h);

    if x_start >= x_end || y_start >= y_end {
        return None;
    }

    Some(Region {
        x_start: x_start as i32,
        y_start: y_start as i32,
        x_end: x_end as i32,
        y_end: y_end as i32,
    })
}

/// Porter-Duff "over" for straight-alpha pixels with an extra opacity factor.
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>, opacity: f64) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f64 / 255.0) * opacity;
    let bg_alpha = background[3] as f64 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f64 / 255.0;
        let bg_f = bg as f64 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
