//! Screencraft is a deterministic screenshot beautifier.
//!
//! It composites an already-decoded raster image onto a styled canvas
//! (solid/gradient/blurred background, optional browser/desktop/mobile
//! chrome, padding, corner rounding, drop shadow) and exports the result as
//! PNG.
//! The whole render is one pure CPU pass over `(settings, source)`:
//!
//! - Build or deserialize a [`CanvasSettings`]
//! - Decode an upload with [`decode_source`]
//! - Render with [`render_frame`], at preview or export resolution
//! - Encode with [`encode_png`]
#![forbid(unsafe_code)]

pub mod background;
pub mod blur;
pub mod color;
pub mod error;
pub mod export;
pub mod frame;
pub mod geometry;
pub mod ingest;
pub mod raster;
pub mod render;
pub mod schedule;
pub mod settings;
pub mod shadow;

pub use error::{ScreencraftError, ScreencraftResult};
pub use export::{encode_png, export_file_name};
pub use geometry::{Layout, display_fit_scale, resolve};
pub use ingest::{MAX_UPLOAD_BYTES, SourceImage, decode_source};
pub use render::{RenderedFrame, render_frame};
pub use schedule::Coalescer;
pub use settings::{
    BackgroundType, CANVAS_PRESETS, CanvasPreset, CanvasSettings, FrameType, GRADIENT_PRESETS,
    GradientPreset, PresetCategory, canvas_preset,
};
