//! Resolution of resource references in markup.

mod images;

pub use images::{find_image, missing_images, resolve_graphics};

use serde::Deserialize;

/// Image shown when `\includegraphics` names no known resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FallbackImage {
    pub url: String,
    pub alt_text: String,
}

pub const NOT_FOUND_IMAGE_URL: &str =
    "https://c4.wallpaperflare.com/wallpaper/839/927/713/404-fon-error-404-not-found-wallpaper-thumb.jpg";

pub const NOT_FOUND_IMAGE_ALT: &str = "An image with the text '404 not found' in faded black in front of a white background. The '404' portion of the text is larger than the rest. It lies on the line above the rest of the text with the entire number enveloped by black flames. A white-red shine is visible on the center-left portion of the '0' in '404'. A watermark for 'FeRRoR' appears in small font on the bottom-right part of the picture.";

impl Default for FallbackImage {
    fn default() -> Self {
        Self {
            url: NOT_FOUND_IMAGE_URL.to_string(),
            alt_text: NOT_FOUND_IMAGE_ALT.to_string(),
        }
    }
}
