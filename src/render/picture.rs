//! The `\pic{...}` macro: an inline image described by a small JSON object.
//!
//! ```text
//! \pic{"url": "https://…/graph.png", "alt": "A graph", "maxHeight": 200, "isInline": true}
//! ```
//!
//! The braces of the macro double as the braces of the object.

use regex_lite::{Captures, Regex};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Text emitted in place of a `\pic` whose argument cannot be read.
pub const PICTURE_FALLBACK: &str = "Image could not be loaded";

static PIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\pic\{(.*?)\}").expect("valid regex"));

/// A `maxHeight` value: a JSON number or a string, used verbatim before `px`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(serde_json::Number),
    Text(String),
}

impl Dimension {
    fn is_unset(&self) -> bool {
        match self {
            Dimension::Number(n) => n.as_f64() == Some(0.0),
            Dimension::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Number(n) => write!(f, "{}", n),
            Dimension::Text(s) => f.write_str(s),
        }
    }
}

/// Fields of a `\pic` argument. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureSpec {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub max_height: Option<Dimension>,
    #[serde(default, deserialize_with = "truthy")]
    pub is_inline: bool,
}

/// Read any JSON value as a flag: `null`, `false`, `0` and `""` are off,
/// everything else is on.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

impl PictureSpec {
    /// Parse the text between the macro braces.
    pub fn parse(fields: &str) -> serde_json::Result<Self> {
        serde_json::from_str(&format!("{{{}}}", fields))
    }

    /// Render as an image block. `default_max_height` applies when no usable
    /// `maxHeight` was given.
    pub fn to_html(&self, default_max_height: u32) -> String {
        let max_height = match &self.max_height {
            Some(height) if !height.is_unset() => height.to_string(),
            _ => default_max_height.to_string(),
        };
        let layout = if self.is_inline { "inline-block" } else { "mx-2 my-8" };

        format!(
            "<div class='{}'><img style='max-height: {}px;' class='mx-auto dark:invert-[0.9]' src='{}' alt='{}'/></div>",
            layout,
            max_height,
            self.url,
            self.alt.as_deref().unwrap_or_default()
        )
    }
}

/// Expand every `\pic{...}`. Unreadable arguments become [`PICTURE_FALLBACK`].
pub fn expand_pictures(text: &str, default_max_height: u32) -> String {
    PIC_RE
        .replace_all(text, |caps: &Captures<'_>| match PictureSpec::parse(&caps[1]) {
            Ok(spec) => spec.to_html(default_max_height),
            Err(err) => {
                debug!(
                    target = "quizmark::render::picture",
                    "unreadable \\pic argument: {err}"
                );
                PICTURE_FALLBACK.to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_all_fields() {
        let spec =
            PictureSpec::parse(r#""url": "a.png", "alt": "A", "maxHeight": 120, "isInline": true"#)
                .unwrap();
        assert_eq!(spec.url, "a.png");
        assert_eq!(spec.alt.as_deref(), Some("A"));
        assert_eq!(spec.max_height.unwrap().to_string(), "120");
        assert!(spec.is_inline);
    }

    #[test]
    fn test_block_picture_with_defaults() {
        assert_eq!(
            expand_pictures(r#"\pic{"url": "a.png", "alt": "A"}"#, 300),
            "<div class='mx-2 my-8'><img style='max-height: 300px;' class='mx-auto dark:invert-[0.9]' src='a.png' alt='A'/></div>"
        );
    }

    #[test]
    fn test_inline_picture_with_height() {
        assert_eq!(
            expand_pictures(r#"\pic{"url": "a.png", "maxHeight": 50, "isInline": true}"#, 300),
            "<div class='inline-block'><img style='max-height: 50px;' class='mx-auto dark:invert-[0.9]' src='a.png' alt=''/></div>"
        );
    }

    #[test]
    fn test_zero_height_uses_default() {
        let html = expand_pictures(r#"\pic{"url": "a.png", "maxHeight": 0}"#, 250);
        assert!(html.contains("max-height: 250px;"));
    }

    #[test]
    fn test_string_height() {
        let html = expand_pictures(r#"\pic{"url": "a.png", "maxHeight": "80"}"#, 300);
        assert!(html.contains("max-height: 80px;"));
    }

    #[test]
    fn test_inline_flag_accepts_any_json_value() {
        for on in ["true", "1", "\"yes\"", "[]"] {
            let html = expand_pictures(&format!(r#"\pic{{"url": "a.png", "isInline": {}}}"#, on), 300);
            assert!(html.starts_with("<div class='inline-block'>"), "{} -> {}", on, html);
        }
        for off in ["false", "null", "0", "\"\""] {
            let html = expand_pictures(&format!(r#"\pic{{"url": "a.png", "isInline": {}}}"#, off), 300);
            assert!(html.starts_with("<div class='mx-2 my-8'>"), "{} -> {}", off, html);
        }
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(
            expand_pictures(r#"before \pic{url: a.png} after"#, 300),
            "before Image could not be loaded after"
        );
    }

    #[test]
    fn test_missing_url_falls_back() {
        assert_eq!(expand_pictures(r#"\pic{"alt": "A"}"#, 300), PICTURE_FALLBACK);
    }
}
