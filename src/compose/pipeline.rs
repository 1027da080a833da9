//! Composition pipelines for the watermark and OGP tools.
//!
//! Both pipelines move through the same stages in one direction:
//!
//! ```text
//! LoadBase -> LoadOverlays -> ComputeLayout -> Blend -> Text -> Finalize
//! ```
//!
//! Loading happens up front, so a missing or undecodable asset aborts the
//! run before any output exists. The `compose_*` functions are pure and
//! work on already decoded assets; the `run_*` functions add loading.
//!
//! # Example
//!
//! ```ignore
//! use imprint::compose::pipeline::run_watermark;
//!
//! let composed = run_watermark(Path::new("photo.jpg"), &config)?;
//! exporter.export_profiles(&composed.canvas, composed.source_type, &profiles, "photo")?;
//! ```

use image::RgbaImage;
use std::fmt;
use std::path::Path;

use super::asset::{load_font, load_image, LoadedImage, SourceType};
use super::compositor::{apply_opacity, Compositor, Layer};
use super::layout::{
    center_offset, overlay_geometry, row_layout, scale_truncated, LayoutSpec, Point,
};
use super::resize::{center_crop, fit_by_orientation, resize_to_width, ResizeFilter};
use super::text::{render_text, FontFace};
use crate::config::{OgpConfig, WatermarkConfig};
use crate::error::Result;

/// Default base name of OGP outputs.
pub const DEFAULT_OGP_NAME: &str = "ogp";

/// Pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    LoadBase,
    LoadOverlays,
    ComputeLayout,
    Blend,
    Text,
    Finalize,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::LoadBase => "load_base",
            Stage::LoadOverlays => "load_overlays",
            Stage::ComputeLayout => "compute_layout",
            Stage::Blend => "blend",
            Stage::Text => "text",
            Stage::Finalize => "finalize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn enter(tool: &'static str, stage: Stage) {
    tracing::debug!(tool, stage = %stage, "Entering pipeline stage");
}

/// Final canvas of a run plus the source type of its base image.
#[derive(Debug, Clone)]
pub struct ComposedCanvas {
    pub canvas: RgbaImage,
    pub source_type: SourceType,
}

impl ComposedCanvas {
    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }
}

// --- Watermark ---

/// Load the base image and configured logo, then compose.
pub fn run_watermark(image_path: &Path, config: &WatermarkConfig) -> Result<ComposedCanvas> {
    enter("watermark", Stage::LoadBase);
    let base = load_image(image_path)?;

    enter("watermark", Stage::LoadOverlays);
    let logo = load_image(&config.logo_img_path)?;

    Ok(compose_watermark(&base, &logo.image, config))
}

/// Place the logo at the bottom-right corner of the base image.
///
/// The logo width and margin scale with the longer side of the base. The
/// logo keeps its aspect ratio and is made translucent by
/// `logo_alpha_value`.
pub fn compose_watermark(
    base: &LoadedImage,
    logo: &RgbaImage,
    config: &WatermarkConfig,
) -> ComposedCanvas {
    enter("watermark", Stage::ComputeLayout);
    let (width, height) = base.image.dimensions();
    let geometry = overlay_geometry(
        width,
        height,
        config.logo_width_magnification,
        config.logo_margin_magnification,
    );
    let resized = resize_to_width(logo, geometry.width, ResizeFilter::Lanczos3);
    let layout = LayoutSpec::bottom_right(width, height, geometry, resized.height());

    enter("watermark", Stage::Blend);
    let mut canvas = base.image.clone();
    let mut compositor = Compositor::new();
    let masked = apply_opacity(&resized, config.logo_alpha_value);
    compositor.add_layer(Layer::opaque(masked, layout.point));
    compositor.apply(&mut canvas);

    enter("watermark", Stage::Finalize);
    tracing::info!(
        path = %base.path.display(),
        width,
        height,
        logo_width = layout.overlay_width,
        margin = layout.margin,
        x = layout.point.x,
        y = layout.point.y,
        "Composed watermark"
    );

    ComposedCanvas {
        canvas,
        source_type: base.source_type,
    }
}

// --- OGP ---

/// Split a comma-separated element list, dropping blank entries.
pub fn parse_element_list(elements: &str) -> Vec<String> {
    elements
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Per-run inputs of the OGP tool.
#[derive(Debug, Clone, PartialEq)]
pub struct OgpRequest {
    /// Element file names, resolved against the source directory.
    pub elements: Vec<String>,
    /// Caption; nothing is drawn when empty.
    pub text: String,
    pub font_size: f32,
    /// Base name of the output files.
    pub output_name: String,
}

impl OgpRequest {
    pub fn new(config: &OgpConfig) -> Self {
        Self {
            elements: Vec::new(),
            text: String::new(),
            font_size: config.font_size,
            output_name: DEFAULT_OGP_NAME.to_string(),
        }
    }

    pub fn with_elements(mut self, elements: &str) -> Self {
        self.elements = parse_element_list(elements);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Empty names keep the default.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.output_name = name;
        }
        self
    }
}

/// Decoded inputs of an OGP run.
#[derive(Debug, Clone)]
pub struct OgpAssets {
    pub background: LoadedImage,
    pub logo: RgbaImage,
    /// In request order.
    pub elements: Vec<RgbaImage>,
    /// Only loaded when the request has a caption.
    pub font: Option<FontFace>,
}

/// Load every asset an OGP run needs.
pub fn load_ogp_assets(config: &OgpConfig, request: &OgpRequest) -> Result<OgpAssets> {
    enter("ogp", Stage::LoadBase);
    let background = load_image(&config.background_path())?;

    enter("ogp", Stage::LoadOverlays);
    let logo = load_image(&config.logo_path())?.image;
    let elements = request
        .elements
        .iter()
        .map(|name| load_image(&config.element_path(name)).map(|loaded| loaded.image))
        .collect::<Result<Vec<_>>>()?;
    let font = if request.text.is_empty() {
        None
    } else {
        Some(match config.font_path() {
            Some(path) => load_font(&path)?,
            None => FontFace::embedded()?,
        })
    };

    Ok(OgpAssets {
        background,
        logo,
        elements,
        font,
    })
}

/// Load assets and compose an OGP card.
pub fn run_ogp(config: &OgpConfig, request: &OgpRequest) -> Result<ComposedCanvas> {
    let assets = load_ogp_assets(config, request)?;
    compose_ogp(&assets, request, config)
}

/// Compose an OGP card of `img_width x img_height`.
///
/// The background is fitted to the card width and center-cropped, which
/// fails when it is not tall enough. Elements form a centered row, the logo
/// sits centered above the row and the caption below it.
pub fn compose_ogp(
    assets: &OgpAssets,
    request: &OgpRequest,
    config: &OgpConfig,
) -> Result<ComposedCanvas> {
    let card_width = config.img_width;
    let card_height = config.img_height;

    enter("ogp", Stage::ComputeLayout);
    let background = resize_to_width(&assets.background.image, card_width, ResizeFilter::Lanczos3);
    let background = apply_opacity(&background, config.bg_alpha_value);
    let mut canvas = center_crop(&background, card_width, card_height)?;

    let logo_width = scale_truncated(card_width as f64, config.logo_width_magnification);
    let logo = resize_to_width(&assets.logo, logo_width, ResizeFilter::CatmullRom);

    let element_size = scale_truncated(card_width as f64, config.element_width_magnification);
    let element_margin = scale_truncated(card_width as f64, config.element_margin_magnification);
    let row = row_layout(card_width, assets.elements.len(), element_size, element_margin);
    let row_y = center_offset(card_height as i32, element_size as i32);

    enter("ogp", Stage::Blend);
    let mut compositor = Compositor::new();
    for (element, x) in assets.elements.iter().zip(row.positions()) {
        let resized = fit_by_orientation(element, element_size, ResizeFilter::Triangle);
        let y = row_y + center_offset(element_size as i32, resized.height() as i32);
        compositor.add_layer(Layer::opaque(resized, Point::new(x, y)));
    }

    let logo_point = Point::new(
        center_offset(card_width as i32, logo.width() as i32),
        center_offset(row_y, logo.height() as i32),
    );
    compositor.add_layer(Layer::opaque(logo, logo_point));

    enter("ogp", Stage::Text);
    if !request.text.is_empty() {
        let font = match &assets.font {
            Some(face) => face.clone(),
            None => FontFace::embedded()?,
        };
        compositor.add_layer(render_text(
            &request.text,
            &font,
            request.font_size,
            card_width,
            card_height,
            row_y + element_size as i32,
            config.text_color()?,
        ));
    }

    enter("ogp", Stage::Finalize);
    compositor.apply(&mut canvas);
    tracing::info!(
        width = card_width,
        height = card_height,
        layers = compositor.layer_count(),
        elements = assets.elements.len(),
        has_text = !request.text.is_empty(),
        "Composed OGP card"
    );

    Ok(ComposedCanvas {
        canvas,
        source_type: assets.background.source_type,
    })
}
