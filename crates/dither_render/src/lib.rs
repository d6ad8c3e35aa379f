mod ascii;
mod color;
mod config;
mod overlay;
mod registry;
mod surface;

pub use ascii::{
    gradient::{GlyphRamp, BLANK_GLYPH},
    grid::GlyphPlacement,
    pattern::{glyph_index, intensity_at, PatternRenderer, BACKGROUND, INTENSITY_THRESHOLD},
};
pub use color::Rgb;
pub use config::{Preset, RenderConfig};
pub use overlay::{Overlay, ResizeDebounce, RESIZE_QUIET_INTERVAL};
pub use registry::{Registry, SURFACE_ID};
pub use surface::{
    raster::RasterSurface,
    recording::{DrawCommand, RecordingSurface},
    text::TextSurface,
    Surface,
};

#[derive(Debug, thiserror::Error)]
pub enum DitherError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    #[error("overlay `{0}` is already installed")]
    AlreadyInitialized(&'static str),
    #[error("invalid color {0:?}, expected #rgb, #rrggbb or 0xrrggbb")]
    InvalidColor(String),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Reason a [`RenderConfig`] was rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("character set must contain at least one glyph")]
    EmptyCharacterSet,
    #[error("spacing must be a positive finite number, got {0}")]
    NonPositiveSpacing(f64),
    #[error("glyph size must be a positive finite number, got {0}")]
    NonPositiveGlyphSize(f64),
    #[error("overlay opacity must be within [0, 1], got {0}")]
    OpacityOutOfRange(f32),
}
