//! Single-line text rasterization.
//!
//! Text is drawn in one colour onto a transparent layer the size of the
//! canvas, horizontally centered and anchored on a baseline.
//!
//! # Features
//!
//! - Fonts loaded from raw TrueType/OpenType bytes
//! - Embedded default face (DejaVu Sans Mono)
//! - Em-size font scaling with kerning-aware measurement
//! - Hex color parsing (#RGB and #RRGGBB formats)
//!
//! # Example
//!
//! ```ignore
//! use imprint::compose::text::{render_text, Color, FontFace};
//!
//! let face = FontFace::embedded()?;
//! let layer = render_text("Hello", &face, 32.0, 1200, 630, 415, Color::white());
//! ```

use super::compositor::Layer;
use super::layout::{center_offset, text_baseline, Point};
use crate::error::{ImprintError, Result};
use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Embedded font data used when no font file is configured.
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

/// A parsed font face.
#[derive(Clone)]
pub struct FontFace {
    font: FontArc,
}

impl FontFace {
    /// Parse a face from raw font file bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font =
            FontArc::try_from_vec(data).map_err(|e| ImprintError::font_load(e.to_string()))?;
        Ok(Self { font })
    }

    /// The built-in DejaVu Sans Mono face.
    pub fn embedded() -> Result<Self> {
        let font = FontArc::try_from_slice(EMBEDDED_FONT_DATA)
            .map_err(|e| ImprintError::font_load(e.to_string()))?;
        Ok(Self { font })
    }

    /// Pixel scale for an em size of `font_size` pixels.
    ///
    /// ab_glyph scales by line height, so the em size is converted using the
    /// face's units-per-em.
    fn scale(&self, font_size: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                PxScale::from(font_size * self.font.height_unscaled() / units_per_em)
            }
            _ => PxScale::from(font_size),
        }
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

/// RGB text colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

/// Parse a hex color string (`#RGB` or `#RRGGBB`).
///
/// ```ignore
/// assert_eq!(parse_hex_color("#FFF")?, Color::white());
/// assert_eq!(parse_hex_color("#FF0000")?, Color::new(255, 0, 0));
/// ```
pub fn parse_hex_color(hex: &str) -> Result<Color> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| invalid_color(hex, "must start with '#'"))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_color(hex, "invalid hex digit"));
    }

    let component = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid_color(hex, "invalid hex digit"))
    };

    match digits.len() {
        3 => Ok(Color::new(
            component(0..1)? * 17,
            component(1..2)? * 17,
            component(2..3)? * 17,
        )),
        6 => Ok(Color::new(component(0..2)?, component(2..4)?, component(4..6)?)),
        n => Err(invalid_color(
            hex,
            &format!("expected #RGB or #RRGGBB, got {} digits", n),
        )),
    }
}

fn invalid_color(hex: &str, reason: &str) -> ImprintError {
    ImprintError::InvalidConfig(format!("text color '{}': {}", hex, reason))
}

/// Width of `text` in pixels: horizontal advances plus kerning.
pub fn measure_text(text: &str, face: &FontFace, font_size: f32) -> f32 {
    let scaled_font = face.font.as_scaled(face.scale(font_size));

    let mut width = 0.0f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            width += scaled_font.kern(prev, glyph_id);
        }
        width += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width
}

/// Render `text` onto a transparent layer of the canvas size.
///
/// The text is centered horizontally. Its baseline is
/// `baseline_offset_y + center_offset(canvas_height, baseline_offset_y)`.
/// Empty text yields a fully transparent layer.
pub fn render_text(
    text: &str,
    face: &FontFace,
    font_size: f32,
    canvas_width: u32,
    canvas_height: u32,
    baseline_offset_y: i32,
    color: Color,
) -> Layer {
    let mut image = RgbaImage::new(canvas_width, canvas_height);
    if text.is_empty() {
        return Layer::opaque(image, Point::default());
    }

    let scale = face.scale(font_size);
    let scaled_font = face.font.as_scaled(scale);

    let width = measure_text(text, face, font_size);
    let origin_x = center_offset(canvas_width as i32, width.round() as i32);
    let baseline_y = text_baseline(canvas_height, baseline_offset_y);

    let mut cursor_x = origin_x as f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y as f32));
        if let Some(outlined) = face.font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x < 0 || y < 0 || x >= canvas_width as i32 || y >= canvas_height as i32 {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                // Overlapping glyph edges keep the stronger coverage
                if alpha > pixel[3] {
                    *pixel = color.with_alpha(alpha);
                }
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    Layer::opaque(image, Point::default())
}
