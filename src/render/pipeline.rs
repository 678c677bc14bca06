//! The ordered list of rewriting stages.
//!
//! Order is part of the contract: math spans are typeset before any macro
//! sees the string, styling macros run in a fixed order, and image references
//! are resolved last so they may appear inside earlier output.

use super::escape::EscapeMarkers;
use super::macros::{expand_blanks, expand_style, Style};
use super::math::{normalize_points, render_spans, MathDelimiter, MathPass, MathRenderer};
use super::picture::expand_pictures;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::resolve::resolve_graphics;
use crate::resource::{QuestionType, Resource};

/// State of one render call.
pub(crate) struct RenderContext<'a> {
    pub math: &'a dyn MathRenderer,
    pub config: &'a RenderConfig,
    pub markers: EscapeMarkers,
    pub resources: Option<&'a [Resource]>,
    pub question_type: Option<QuestionType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NormalizePoints,
    Math(MathDelimiter),
    Style(Style),
    Pictures,
    Blanks,
    IncludeGraphics,
}

/// A named pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    action: Action,
}

const fn stage(name: &'static str, action: Action) -> Stage {
    Stage { name, action }
}

/// Every stage, in the order it runs.
pub static STAGES: &[Stage] = &[
    stage("points", Action::NormalizePoints),
    stage("display-dollars", Action::Math(MathDelimiter::DoubleDollar)),
    stage("display-brackets", Action::Math(MathDelimiter::Brackets)),
    stage("inline-parens", Action::Math(MathDelimiter::Parens)),
    stage("inline-dollars", Action::Math(MathDelimiter::Dollar)),
    stage("verb", Action::Style(Style::Verb)),
    stage("texttt", Action::Style(Style::Texttt)),
    stage("textbf", Action::Style(Style::Bold)),
    stage("textit", Action::Style(Style::Italic)),
    stage("underline", Action::Style(Style::Underline)),
    stage("fontsize", Action::Style(Style::FontSize)),
    stage("textsuperscript", Action::Style(Style::Superscript)),
    stage("textsubscript", Action::Style(Style::Subscript)),
    stage("indent", Action::Style(Style::Indent)),
    stage("centerline", Action::Style(Style::CenterLine)),
    stage("rightline", Action::Style(Style::RightLine)),
    stage("textcolor", Action::Style(Style::TextColor)),
    stage("pic", Action::Pictures),
    stage("blanks", Action::Blanks),
    stage("includegraphics", Action::IncludeGraphics),
];

/// Names of all stages in run order.
pub fn stage_names() -> Vec<&'static str> {
    STAGES.iter().map(|stage| stage.name).collect()
}

impl Stage {
    pub(crate) fn apply(&self, text: &str, ctx: &RenderContext<'_>) -> Result<String> {
        Ok(match self.action {
            Action::NormalizePoints => normalize_points(text),
            Action::Math(delimiter) => {
                let pass = MathPass {
                    renderer: ctx.math,
                    markers: ctx.markers,
                    comma_breaks: ctx.config.comma_breaks,
                };
                render_spans(text, delimiter, &pass)?
            }
            Action::Style(style) => expand_style(text, style),
            Action::Pictures => expand_pictures(text, ctx.config.picture_max_height),
            Action::Blanks => match ctx.question_type {
                Some(QuestionType::FillInBlank) => expand_blanks(text),
                _ => text.to_string(),
            },
            Action::IncludeGraphics => {
                resolve_graphics(text, ctx.resources, &ctx.config.fallback_image)
            }
        })
    }
}

/// Run the whole pipeline: encode, every stage in order, decode.
pub(crate) fn run(input: &str, ctx: &RenderContext<'_>) -> Result<String> {
    let mut text = ctx.markers.encode(input);
    for stage in STAGES {
        text = stage.apply(&text, ctx)?;
    }
    Ok(ctx.markers.decode(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::math::testing::StubRenderer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_order() {
        assert_eq!(
            stage_names(),
            vec![
                "points",
                "display-dollars",
                "display-brackets",
                "inline-parens",
                "inline-dollars",
                "verb",
                "texttt",
                "textbf",
                "textit",
                "underline",
                "fontsize",
                "textsuperscript",
                "textsubscript",
                "indent",
                "centerline",
                "rightline",
                "textcolor",
                "pic",
                "blanks",
                "includegraphics",
            ]
        );
    }

    #[test]
    fn test_style_stages_follow_declared_order() {
        let styles: Vec<Style> = STAGES
            .iter()
            .filter_map(|stage| match stage.action {
                Action::Style(style) => Some(style),
                _ => None,
            })
            .collect();
        assert_eq!(styles, Style::ALL.to_vec());
        for (stage, style) in STAGES.iter().skip(5).zip(Style::ALL) {
            assert_eq!(stage.name, style.name());
        }
    }

    #[test]
    fn test_blank_stage_needs_fill_in_blank() {
        let config = RenderConfig::default();
        let mut ctx = RenderContext {
            math: &StubRenderer,
            config: &config,
            markers: EscapeMarkers::choose([""]).unwrap(),
            resources: None,
            question_type: Some(QuestionType::ShortAnswer),
        };
        let blanks = STAGES.iter().find(|stage| stage.name == "blanks").unwrap();

        assert_eq!(blanks.apply("[x]", &ctx).unwrap(), "[x]");

        ctx.question_type = Some(QuestionType::FillInBlank);
        assert_eq!(
            blanks.apply("[x]", &ctx).unwrap(),
            r#"<input id="replace" index=0></input>"#
        );
    }

    #[test]
    fn test_run_math_then_macros() {
        let config = RenderConfig::default();
        let ctx = RenderContext {
            math: &StubRenderer,
            config: &config,
            markers: EscapeMarkers::choose([""]).unwrap(),
            resources: None,
            question_type: None,
        };
        assert_eq!(
            run("$a,b$\n\\textbf{y}", &ctx).unwrap(),
            "<span class=\"stub-inline\">a, &#92;allowbreak b</span> <br /> <span class='font-bold'>y</span>"
        );
    }
}
