//! Rendering layer: turns question markup into HTML.

pub mod escape;
pub mod macros;
pub mod math;
pub mod picture;
pub mod pipeline;

pub use math::{create_renderer, MathBackend, MathRenderer};
pub use pipeline::{stage_names, Stage, STAGES};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::resource::{QuestionType, Resource};
use escape::EscapeMarkers;
use pipeline::RenderContext;
use tracing::{debug, warn};

/// A configured renderer. Holds no per-call state, so one instance can serve
/// concurrent calls.
pub struct Renderer {
    config: RenderConfig,
    math: Box<dyn MathRenderer>,
}

impl Renderer {
    /// Create a renderer using the math backend named in `config`.
    pub fn new(config: RenderConfig) -> Self {
        let math = create_renderer(config.math_backend);
        Self { config, math }
    }

    /// Create a renderer with a caller-supplied math typesetter.
    pub fn with_math_renderer(config: RenderConfig, math: Box<dyn MathRenderer>) -> Self {
        Self { config, math }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// HTML head content the chosen math backend needs, if any.
    pub fn head_content(&self) -> Option<String> {
        self.math.head_content()
    }

    /// Render markup to HTML.
    ///
    /// # Errors
    ///
    /// Fails when the math typesetter rejects a math span, or when no escape
    /// markers can be chosen for the input.
    pub fn render(
        &self,
        input: &str,
        resources: Option<&[Resource]>,
        question_type: Option<QuestionType>,
    ) -> Result<String> {
        debug!(
            target = "quizmark::render",
            resources = resources.map_or(0, <[Resource]>::len),
            question_type = ?question_type,
            "rendering markup"
        );

        let markers = EscapeMarkers::choose(self.marker_exclusions(input, resources))?;
        let ctx = RenderContext {
            math: self.math.as_ref(),
            config: &self.config,
            markers,
            resources,
            question_type,
        };
        pipeline::run(input, &ctx)
    }

    /// Render markup to HTML, returning `input` unchanged if rendering fails.
    pub fn try_render(
        &self,
        input: &str,
        resources: Option<&[Resource]>,
        question_type: Option<QuestionType>,
    ) -> String {
        match self.render(input, resources, question_type) {
            Ok(html) => html,
            Err(err) => {
                warn!(
                    target = "quizmark::render",
                    "rendering failed, returning markup unchanged: {err}"
                );
                input.to_string()
            }
        }
    }

    /// `IMAGE` resources never mentioned in `input`.
    pub fn missing_images<'r>(&self, input: &str, resources: &'r [Resource]) -> Vec<&'r Resource> {
        crate::resolve::missing_images(input, resources)
    }

    /// Every text that can end up in the working string besides fixed markup.
    fn marker_exclusions<'a>(
        &'a self,
        input: &'a str,
        resources: Option<&'a [Resource]>,
    ) -> Vec<&'a str> {
        let mut texts = vec![
            input,
            self.config.fallback_image.url.as_str(),
            self.config.fallback_image.alt_text.as_str(),
        ];
        for data in resources.unwrap_or_default().iter().filter_map(Resource::url_data) {
            texts.push(&data.url);
            if let Some(alt) = &data.alt_text {
                texts.push(alt);
            }
        }
        texts
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::math::testing::StubRenderer;
    use crate::resolve::NOT_FOUND_IMAGE_URL;
    use pretty_assertions::assert_eq;

    fn renderer() -> Renderer {
        Renderer::with_math_renderer(RenderConfig::default(), Box::new(StubRenderer))
    }

    #[test]
    fn test_plain_text_unchanged() {
        let input = "What is the capital of France? (Answer in one word.)";
        assert_eq!(renderer().render(input, None, None).unwrap(), input);
    }

    #[test]
    fn test_newline_becomes_line_break() {
        assert_eq!(
            renderer().render("first\nsecond", None, None).unwrap(),
            "first <br /> second"
        );
    }

    #[test]
    fn test_escaped_dollar_is_literal() {
        assert_eq!(
            renderer().render("It costs \\$5 and \\$6", None, None).unwrap(),
            "It costs $5 and $6"
        );
    }

    #[test]
    fn test_escaped_dollar_inside_math_is_dropped() {
        assert_eq!(
            renderer().render("$x \\$ y$", None, None).unwrap(),
            "<span class=\"stub-inline\">x   y</span>"
        );
    }

    #[test]
    fn test_newline_inside_math_collapses() {
        assert_eq!(
            renderer().render("$$a\nb$$", None, None).unwrap(),
            "<div class=\"stub-display\">a b</div>"
        );
    }

    #[test]
    fn test_display_and_inline_share_content() {
        let r = renderer();
        assert_eq!(
            r.render("$$2x+2$$", None, None).unwrap(),
            "<div class=\"stub-display\">2x+2</div>"
        );
        assert_eq!(
            r.render("$2x+2$", None, None).unwrap(),
            "<span class=\"stub-inline\">2x+2</span>"
        );
    }

    #[test]
    fn test_bare_point_gets_parentheses() {
        assert_eq!(
            renderer().render("Plot the point \\(3,4\\).", None, None).unwrap(),
            "Plot the point <span class=\"stub-inline\">(3, &#92;allowbreak 4)</span>."
        );
    }

    #[test]
    fn test_bold() {
        assert_eq!(
            renderer().render("\\textbf{hi}", None, None).unwrap(),
            "<span class='font-bold'>hi</span>"
        );
    }

    #[test]
    fn test_fill_in_blank_indices() {
        let html = renderer()
            .render("The [blank] sat on the\n[blank].", None, Some(QuestionType::FillInBlank))
            .unwrap();
        assert_eq!(
            html,
            r#"The <input id="replace" index=0></input> sat on the <br /> <input id="replace" index=1></input>."#
        );
    }

    #[test]
    fn test_blanks_untouched_for_other_types() {
        let input = "[blank] and [blank]";
        for question_type in [None, Some(QuestionType::MultipleChoice), Some(QuestionType::Parent)] {
            assert_eq!(renderer().render(input, None, question_type).unwrap(), input);
        }
    }

    #[test]
    fn test_counter_is_per_call() {
        let r = renderer();
        for _ in 0..2 {
            let html = r.render("[a]", None, Some(QuestionType::FillInBlank)).unwrap();
            assert_eq!(html, r#"<input id="replace" index=0></input>"#);
        }
    }

    #[test]
    fn test_includegraphics_without_resources() {
        let html = renderer()
            .render("\\includegraphics{missing-id}", None, None)
            .unwrap();
        assert!(html.contains(NOT_FOUND_IMAGE_URL));
        assert!(html.starts_with("<div class='mx-2 my-8'>"));
    }

    #[test]
    fn test_includegraphics_with_resource() {
        let resources = vec![Resource::image("graph", "https://cdn.test/graph.png").with_alt_text("Graph")];
        let html = renderer()
            .render("See:\n\\includegraphics{graph}", Some(resources.as_slice()), None)
            .unwrap();
        assert!(html.starts_with("See: <br /> <div"));
        assert!(html.contains("src='https://cdn.test/graph.png' alt='Graph'"));
    }

    #[test]
    fn test_markers_avoid_private_use_input() {
        let input = "\u{E000}\u{E001}\nx";
        assert_eq!(
            renderer().render(input, None, None).unwrap(),
            "\u{E000}\u{E001} <br /> x"
        );
    }

    #[test]
    fn test_markers_avoid_resource_text() {
        let resources = vec![Resource::image("p", "\u{E000}.png")];
        let html = renderer()
            .render("\\includegraphics{p}\n", Some(resources.as_slice()), None)
            .unwrap();
        assert!(html.contains("src='\u{E000}.png'"));
        assert!(html.ends_with(" <br /> "));
    }

    #[test]
    fn test_no_markers_in_output() {
        let inputs = [
            "a\nb",
            "\\$",
            "$\\$$",
            "\\textbf{\n}",
            "$$\n$$ \\$ $x\n$",
            "[\n] \\$[x]",
            "\\pic{\"url\": \"\n\"}",
        ];
        let r = renderer();
        for input in inputs {
            let html = r.render(input, None, Some(QuestionType::FillInBlank)).unwrap();
            assert!(
                !html.chars().any(|c| ('\u{E000}'..='\u{F8FF}').contains(&c)),
                "marker left in output for {:?}: {:?}",
                input,
                html
            );
        }
    }

    #[test]
    fn test_math_fault_propagates() {
        let err = renderer().render("$\\frac{1}{$", None, None).unwrap_err();
        assert!(err.to_string().contains("Math rendering error"));
    }

    #[test]
    fn test_try_render_returns_input_on_fault() {
        let input = "Solve $\\frac{1}{$ now\nplease";
        assert_eq!(renderer().try_render(input, None, None), input);
    }

    #[test]
    fn test_try_render_success_matches_render() {
        let r = renderer();
        let input = "\\textit{x} $y$";
        assert_eq!(r.try_render(input, None, None), r.render(input, None, None).unwrap());
    }

    #[test]
    fn test_generated_markup_survives_rerender() {
        let r = renderer();
        let once = r.render("[x]", None, Some(QuestionType::FillInBlank)).unwrap();
        let twice = r.render(&once, None, Some(QuestionType::FillInBlank)).unwrap();
        assert_eq!(once, twice);

        let once = r.render("\\texttt{a}", None, Some(QuestionType::FillInBlank)).unwrap();
        assert!(once.contains("bg-[#ddd]"));
    }

    #[test]
    fn test_renderer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Renderer>();
    }
}
