//! MathML renderer.

use super::MathRenderer;
use crate::error::Result;

#[cfg(feature = "mathml")]
use crate::error::RenderError;

/// Renderer that converts LaTeX to MathML.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathMLRenderer;

impl MathMLRenderer {
    /// Create a new MathML renderer.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "mathml")]
fn to_mathml(latex: &str, style: latex2mathml::DisplayStyle) -> Result<String> {
    Ok(latex2mathml::latex_to_mathml(latex, style)
        .map_err(|err| RenderError::Math(format!("MathML conversion failed: {}", err)))?)
}

impl MathRenderer for MathMLRenderer {
    fn render_inline(&self, latex: &str) -> Result<String> {
        #[cfg(feature = "mathml")]
        {
            to_mathml(latex, latex2mathml::DisplayStyle::Inline)
        }

        // Without the mathml feature, fall back to client-side rendering
        #[cfg(not(feature = "mathml"))]
        {
            super::PassthroughRenderer::new().render_inline(latex)
        }
    }

    fn render_display(&self, latex: &str) -> Result<String> {
        #[cfg(feature = "mathml")]
        {
            let mathml = to_mathml(latex, latex2mathml::DisplayStyle::Block)?;
            Ok(format!(r#"<div class="math display">{}</div>"#, mathml))
        }

        #[cfg(not(feature = "mathml"))]
        {
            super::PassthroughRenderer::new().render_display(latex)
        }
    }

    fn head_content(&self) -> Option<String> {
        #[cfg(feature = "mathml")]
        {
            Some(MATHML_STYLES.to_string())
        }

        #[cfg(not(feature = "mathml"))]
        {
            super::PassthroughRenderer::new().head_content()
        }
    }
}

#[cfg(feature = "mathml")]
const MATHML_STYLES: &str = r#"<style>
math {
    font-size: 1.1em;
}
.math.display {
    text-align: center;
    margin: 1em 0;
}
</style>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mathml_inline() {
        let renderer = MathMLRenderer::new();
        let result = renderer.render_inline("x^2").unwrap();
        // Should produce some output regardless of feature
        assert!(!result.is_empty());
    }

    #[cfg(feature = "mathml")]
    #[test]
    fn test_mathml_display_wraps_block() {
        let renderer = MathMLRenderer::new();
        let result = renderer.render_display("x^2").unwrap();
        assert!(result.starts_with(r#"<div class="math display">"#));
        assert!(result.contains("<math"));
    }
}
