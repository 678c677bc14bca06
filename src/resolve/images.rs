//! `\includegraphics{id}` resolution against the caller's resources.

use super::FallbackImage;
use crate::resource::{Resource, UrlResourceData};
use regex_lite::{Captures, Regex};
use std::sync::LazyLock;
use tracing::warn;

static INCLUDEGRAPHICS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\includegraphics\{([a-zA-Z0-9_-]+)\}").expect("valid regex"));

/// Find the `IMAGE` resource with the given id.
pub fn find_image<'a>(resources: Option<&'a [Resource]>, id: &str) -> Option<&'a UrlResourceData> {
    resources?
        .iter()
        .find(|resource| resource.is_image() && resource.id.as_deref() == Some(id))
        .and_then(Resource::url_data)
}

fn image_block(url: &str, alt: &str) -> String {
    format!(
        "<div class='mx-2 my-8'><img class='mx-auto max-h-[300px] dark:invert-[0.9]' src='{}' alt='{}'/></div>",
        url, alt
    )
}

/// Replace each `\includegraphics{id}` with a centered image block.
///
/// Ids with no matching `IMAGE` resource, or any id when `resources` is
/// `None`, get the fallback image. This never fails.
pub fn resolve_graphics(
    text: &str,
    resources: Option<&[Resource]>,
    fallback: &FallbackImage,
) -> String {
    INCLUDEGRAPHICS_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let id = &caps[1];
            match find_image(resources, id) {
                Some(data) => image_block(&data.url, data.alt_text.as_deref().unwrap_or_default()),
                None => {
                    warn!(
                        target = "quizmark::resolve::images",
                        id,
                        "\\includegraphics references an unknown image; using fallback"
                    );
                    image_block(&fallback.url, &fallback.alt_text)
                }
            }
        })
        .into_owned()
}

/// `IMAGE` resources whose id does not occur anywhere in `input`.
///
/// Plain substring containment on the unrendered markup: an id mentioned in
/// prose counts as referenced. Resources without an id are never reported.
pub fn missing_images<'a>(input: &str, resources: &'a [Resource]) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|resource| resource.is_image())
        .filter(|resource| !input.contains(resource.id.as_deref().unwrap_or_default()))
        .collect()
}
