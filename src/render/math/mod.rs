//! Math rendering backends and the math-mode stages of the pipeline.

mod katex;
mod mathml;
mod passthrough;

pub use self::katex::KaTeXRenderer;
pub use self::mathml::MathMLRenderer;
pub use self::passthrough::PassthroughRenderer;

use super::escape::EscapeMarkers;
use crate::error::Result;
use regex_lite::{Captures, Regex};
use serde::Deserialize;
use std::sync::LazyLock;

/// Math rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathBackend {
    /// Typeset on the server with KaTeX.
    #[default]
    KaTeX,
    /// Convert to MathML for native browser rendering.
    MathML,
    /// Leave the TeX in place for KaTeX to render client-side.
    Passthrough,
}

impl MathBackend {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "katex" => Some(MathBackend::KaTeX),
            "mathml" => Some(MathBackend::MathML),
            "passthrough" => Some(MathBackend::Passthrough),
            _ => None,
        }
    }
}

/// Trait for math renderers.
///
/// Implementations must fail on math they cannot typeset; the pipeline does
/// not recover from math errors.
pub trait MathRenderer: Send + Sync {
    /// Render inline math.
    fn render_inline(&self, latex: &str) -> Result<String>;

    /// Render display math.
    fn render_display(&self, latex: &str) -> Result<String>;

    /// Get any required HTML head content (scripts, styles).
    fn head_content(&self) -> Option<String>;

    fn render(&self, latex: &str, display_mode: bool) -> Result<String> {
        if display_mode {
            self.render_display(latex)
        } else {
            self.render_inline(latex)
        }
    }
}

/// Create a math renderer for the given backend.
pub fn create_renderer(backend: MathBackend) -> Box<dyn MathRenderer> {
    match backend {
        MathBackend::KaTeX => Box::new(KaTeXRenderer::new()),
        MathBackend::MathML => Box::new(MathMLRenderer::new()),
        MathBackend::Passthrough => Box::new(PassthroughRenderer::new()),
    }
}

/// The four math delimiter forms, in the order the pipeline extracts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDelimiter {
    /// `$$...$$`
    DoubleDollar,
    /// `\[...\]`
    Brackets,
    /// `\(...\)`
    Parens,
    /// `$...$`, last so single dollars never cut into a `$$` span.
    Dollar,
}

static DOUBLE_DOLLAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$(.*?)\$\$").expect("valid regex"));
static BRACKETS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\[(.*?)\\\]").expect("valid regex"));
static PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\((.*?)\\\)").expect("valid regex"));
static DOLLAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(.*?)\$").expect("valid regex"));

/// `point \(1,2\)` written without the coordinate's own parentheses.
static BARE_POINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"point \\\(([-0-9+][-,0-9+]*)\\\)").expect("valid regex"));

impl MathDelimiter {
    pub const ALL: [MathDelimiter; 4] = [
        MathDelimiter::DoubleDollar,
        MathDelimiter::Brackets,
        MathDelimiter::Parens,
        MathDelimiter::Dollar,
    ];

    pub fn display_mode(&self) -> bool {
        matches!(self, MathDelimiter::DoubleDollar | MathDelimiter::Brackets)
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            MathDelimiter::DoubleDollar => &*DOUBLE_DOLLAR_RE,
            MathDelimiter::Brackets => &*BRACKETS_RE,
            MathDelimiter::Parens => &*PARENS_RE,
            MathDelimiter::Dollar => &*DOLLAR_RE,
        }
    }
}

/// Options for the math-mode sub-pass.
#[derive(Clone, Copy)]
pub struct MathPass<'a> {
    pub renderer: &'a dyn MathRenderer,
    pub markers: EscapeMarkers,
    pub comma_breaks: bool,
}

/// Rewrite `point \(1,2\)` as `point \((1,2)\)`.
pub fn normalize_points(text: &str) -> String {
    BARE_POINT_RE
        .replace_all(text, |caps: &Captures<'_>| format!("point \\(({})\\)", &caps[1]))
        .into_owned()
}

/// Prepare extracted math content for the typesetter.
///
/// Commas become break opportunities and escape markers collapse to spaces.
pub fn prepare_math(content: &str, markers: &EscapeMarkers, comma_breaks: bool) -> String {
    let content = if comma_breaks {
        content.replace(',', ", \\allowbreak ")
    } else {
        content.to_string()
    };
    markers.strip_for_math(&content)
}

/// Typeset every span delimited by `delimiter`.
///
/// The typeset HTML goes through [`shield_macro_syntax`], so no later stage
/// can match inside it.
pub fn render_spans(text: &str, delimiter: MathDelimiter, pass: &MathPass<'_>) -> Result<String> {
    try_replace_all(delimiter.pattern(), text, |caps| {
        let latex = prepare_math(&caps[1], &pass.markers, pass.comma_breaks);
        let html = pass.renderer.render(&latex, delimiter.display_mode())?;
        Ok(shield_macro_syntax(&html))
    })
}

/// Entity-encode the characters later stages key on: `\` starts a macro,
/// `[`/`]` delimit a blank and `$` delimits math.
///
/// Typesetters emit these only in text nodes, so the rendered math is unchanged.
pub fn shield_macro_syntax(html: &str) -> String {
    html.replace('\\', "&#92;")
        .replace('[', "&#91;")
        .replace(']', "&#93;")
        .replace('$', "&#36;")
}

/// `Regex::replace_all` with a replacement that can fail.
pub(crate) fn try_replace_all<F>(re: &Regex, haystack: &str, mut replace: F) -> Result<String>
where
    F: FnMut(&Captures<'_>) -> Result<String>,
{
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;

    for caps in re.captures_iter(haystack) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&haystack[last..whole.start()]);
        out.push_str(&replace(&caps)?);
        last = whole.end();
    }

    out.push_str(&haystack[last..]);
    Ok(out)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::MathRenderer;
    use crate::error::{RenderError, Result};

    /// Deterministic renderer for pipeline tests. Rejects unbalanced braces the
    /// way a real typesetter would.
    pub struct StubRenderer;

    impl StubRenderer {
        fn check(latex: &str) -> Result<()> {
            let mut depth = 0i32;
            for c in latex.chars() {
                match c {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    _ => {}
                }
                if depth < 0 {
                    break;
                }
            }
            if depth == 0 {
                Ok(())
            } else {
                Err(RenderError::Math(format!("unbalanced braces in {:?}", latex)).into())
            }
        }
    }

    impl MathRenderer for StubRenderer {
        fn render_inline(&self, latex: &str) -> Result<String> {
            Self::check(latex)?;
            Ok(format!("<span class=\"stub-inline\">{}</span>", latex))
        }

        fn render_display(&self, latex: &str) -> Result<String> {
            Self::check(latex)?;
            Ok(format!("<div class=\"stub-display\">{}</div>", latex))
        }

        fn head_content(&self) -> Option<String> {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubRenderer;
    use super::*;
    use pretty_assertions::assert_eq;

    fn pass(renderer: &dyn MathRenderer) -> MathPass<'_> {
        MathPass {
            renderer,
            markers: EscapeMarkers::choose([""]).unwrap(),
            comma_breaks: true,
        }
    }

    fn render_all(text: &str) -> String {
        let renderer = StubRenderer;
        let pass = pass(&renderer);
        let mut out = text.to_string();
        for delimiter in MathDelimiter::ALL {
            out = render_spans(&out, delimiter, &pass).unwrap();
        }
        out
    }

    #[test]
    fn test_normalize_points() {
        assert_eq!(normalize_points("the point \\(1,-2\\)"), "the point \\((1,-2)\\)");
        assert_eq!(normalize_points("point \\(+3\\) and point \\(4,5\\)"), "point \\((+3)\\) and point \\((4,5)\\)");
    }

    #[test]
    fn test_normalize_points_leaves_other_math() {
        assert_eq!(normalize_points("point \\((1,2)\\)"), "point \\((1,2)\\)");
        assert_eq!(normalize_points("point \\(x,2\\)"), "point \\(x,2\\)");
        assert_eq!(normalize_points("\\(1,2\\)"), "\\(1,2\\)");
    }

    #[test]
    fn test_prepare_math_breaks_after_commas() {
        let markers = EscapeMarkers::choose([""]).unwrap();
        assert_eq!(prepare_math("f(a,b)", &markers, true), "f(a, \\allowbreak b)");
        assert_eq!(prepare_math("f(a,b)", &markers, false), "f(a,b)");
    }

    #[test]
    fn test_prepare_math_strips_markers() {
        let markers = EscapeMarkers::choose([""]).unwrap();
        let encoded = markers.encode("x\ny");
        assert_eq!(prepare_math(&encoded, &markers, true), "x y");
    }

    #[test]
    fn test_display_and_inline_dollars() {
        assert_eq!(render_all("$$2x+2$$"), "<div class=\"stub-display\">2x+2</div>");
        assert_eq!(render_all("$2x+2$"), "<span class=\"stub-inline\">2x+2</span>");
    }

    #[test]
    fn test_bracket_and_paren_delimiters() {
        assert_eq!(render_all("\\[a\\]"), "<div class=\"stub-display\">a</div>");
        assert_eq!(render_all("\\(a\\)"), "<span class=\"stub-inline\">a</span>");
    }

    #[test]
    fn test_double_dollar_takes_precedence() {
        assert_eq!(
            render_all("$$a$$ and $b$"),
            "<div class=\"stub-display\">a</div> and <span class=\"stub-inline\">b</span>"
        );
    }

    #[test]
    fn test_first_close_wins() {
        assert_eq!(
            render_all("$a$b$c$"),
            "<span class=\"stub-inline\">a</span>b<span class=\"stub-inline\">c</span>"
        );
    }

    #[test]
    fn test_lone_dollar_untouched() {
        assert_eq!(render_all("it costs 5$ today"), "it costs 5$ today");
    }

    #[test]
    fn test_typeset_output_is_shielded() {
        assert_eq!(
            render_all("$[0,1]$"),
            "<span class=\"stub-inline\">&#91;0, &#92;allowbreak 1&#93;</span>"
        );
    }

    #[test]
    fn test_shield_is_idempotent() {
        let once = shield_macro_syntax("\\textbf{[x]} $");
        assert_eq!(once, "&#92;textbf{&#91;x&#93;} &#36;");
        assert_eq!(shield_macro_syntax(&once), once);
    }

    #[test]
    fn test_render_error_propagates() {
        let renderer = StubRenderer;
        let err = render_spans("$\\frac{1}{$", MathDelimiter::Dollar, &pass(&renderer)).unwrap_err();
        assert!(err.to_string().contains("unbalanced"));
    }

    #[test]
    fn test_backend_from_name() {
        assert_eq!(MathBackend::from_name("KaTeX"), Some(MathBackend::KaTeX));
        assert_eq!(MathBackend::from_name("mathml"), Some(MathBackend::MathML));
        assert_eq!(MathBackend::from_name("passthrough"), Some(MathBackend::Passthrough));
        assert_eq!(MathBackend::from_name("mathjax"), None);
    }
}
