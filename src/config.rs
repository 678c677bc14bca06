//! Render configuration, loadable from TOML.
//!
//! ```toml
//! math_backend = "katex"     # "katex", "mathml" or "passthrough"
//! comma_breaks = true
//! picture_max_height = 300
//!
//! [fallback_image]
//! url = "https://cdn.example.com/missing.png"
//! alt_text = "Image unavailable"
//! ```

use crate::error::{ConfigError, Result};
use crate::render::MathBackend;
use crate::resolve::FallbackImage;
use serde::Deserialize;

/// Default `max-height` (px) of a `\pic` image.
pub const DEFAULT_PICTURE_MAX_HEIGHT: u32 = 300;

/// Configuration for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Math rendering backend.
    pub math_backend: MathBackend,
    /// Whether commas in math mode become line-break opportunities.
    pub comma_breaks: bool,
    /// `max-height` used by `\pic` when none is given.
    pub picture_max_height: u32,
    /// Image shown for unresolved `\includegraphics` ids.
    pub fallback_image: FallbackImage,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            math_backend: MathBackend::default(),
            comma_breaks: true,
            picture_max_height: DEFAULT_PICTURE_MAX_HEIGHT,
            fallback_image: FallbackImage::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| ConfigError::Toml(e.to_string()).into())
    }
}
