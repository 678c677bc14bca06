//! Client-side passthrough renderer.

use super::{escape_html, shield_macro_syntax, MathRenderer};
use crate::error::Result;

/// Renderer that leaves the TeX for KaTeX to render in the browser.
///
/// The TeX is entity-encoded so that the later macro stages, which look for
/// backslashes, brackets and dollars, cannot touch it. Browsers decode the
/// entities before the auto-render script reads the element text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughRenderer;

impl PassthroughRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MathRenderer for PassthroughRenderer {
    fn render_inline(&self, latex: &str) -> Result<String> {
        Ok(format!(r#"<span class="math inline">{}</span>"#, encode_tex(latex)))
    }

    fn render_display(&self, latex: &str) -> Result<String> {
        Ok(format!(r#"<div class="math display">{}</div>"#, encode_tex(latex)))
    }

    fn head_content(&self) -> Option<String> {
        Some(KATEX_HEAD.to_string())
    }
}

fn encode_tex(latex: &str) -> String {
    shield_macro_syntax(&escape_html(latex))
}

const KATEX_HEAD: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css" crossorigin="anonymous">
<script defer src="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.js" crossorigin="anonymous"
    onload="document.querySelectorAll('.math').forEach(function (el) {
        katex.render(el.textContent, el, { displayMode: el.classList.contains('display'), throwOnError: false });
    });"></script>"#;
