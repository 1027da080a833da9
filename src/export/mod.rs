//! Multi-format export of composed canvases.
//!
//! A canvas is written once per [`ExportProfile`] (resized to the profile's
//! size) or once per format string (at its own size). Format strings are
//! matched exactly; `jpeg`/`jpg`, `png`, `gif` and `webp` are supported.
//!
//! # Example
//!
//! ```ignore
//! use imprint::export::{ExportDestination, Exporter, ExportProfile};
//!
//! let exporter = Exporter::new(ExportDestination::Directory("./tmp/".into()));
//! let report = exporter.export_profiles(
//!     &canvas,
//!     source_type,
//!     &[ExportProfile::new(300, "png"), ExportProfile::new(150, "webp")],
//!     "photo",
//! )?;
//! ```

pub mod encoder;
pub mod exporter;
pub mod format;
pub mod profile;

pub use encoder::{EncodedImage, EncoderFactory, ImageEncoder};
pub use exporter::{ExportDestination, ExportReport, Exporter, WrittenFile};
pub use format::{OutputFormat, WebpCompression};
pub use profile::{load_profiles, ExportProfile};
