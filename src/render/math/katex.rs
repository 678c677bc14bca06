//! Server-side KaTeX renderer.

use super::MathRenderer;
use crate::error::Result;

#[cfg(feature = "katex")]
use crate::error::RenderError;

/// Renderer that typesets TeX to HTML with KaTeX.
///
/// Without the `katex` feature the TeX is handed to the client instead, in the
/// same markup [`super::PassthroughRenderer`] produces.
#[derive(Debug, Default, Clone, Copy)]
pub struct KaTeXRenderer;

impl KaTeXRenderer {
    /// Create a new KaTeX renderer.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "katex")]
fn render_katex(latex: &str, display_mode: bool) -> Result<String> {
    let mut builder = ::katex::OptsBuilder::default();
    builder.display_mode(display_mode);
    // HTML only: the MathML annotation would carry raw TeX into the macro stages.
    builder.output_type(::katex::OutputType::Html);

    let opts = builder
        .build()
        .map_err(|err| RenderError::Math(format!("failed to build KaTeX options: {}", err)))?;

    Ok(::katex::render_with_opts(latex, opts)
        .map_err(|err| RenderError::Math(format!("KaTeX rendering failed: {}", err)))?)
}

impl MathRenderer for KaTeXRenderer {
    fn render_inline(&self, latex: &str) -> Result<String> {
        #[cfg(feature = "katex")]
        {
            render_katex(latex, false)
        }

        #[cfg(not(feature = "katex"))]
        {
            super::PassthroughRenderer::new().render_inline(latex)
        }
    }

    fn render_display(&self, latex: &str) -> Result<String> {
        #[cfg(feature = "katex")]
        {
            render_katex(latex, true)
        }

        #[cfg(not(feature = "katex"))]
        {
            super::PassthroughRenderer::new().render_display(latex)
        }
    }

    fn head_content(&self) -> Option<String> {
        #[cfg(feature = "katex")]
        {
            Some(KATEX_STYLESHEET.to_string())
        }

        #[cfg(not(feature = "katex"))]
        {
            super::PassthroughRenderer::new().head_content()
        }
    }
}

#[cfg(feature = "katex")]
const KATEX_STYLESHEET: &str = r#"<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css" crossorigin="anonymous">"#;
