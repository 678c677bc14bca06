//! Styling macros and fill-in-blank brackets.
//!
//! Each macro is a single non-greedy pattern expanded in one pass. Macros are
//! not nested: a macro inside another macro's argument is only expanded if its
//! own stage runs later.

use regex_lite::{Captures, Regex};
use std::sync::LazyLock;

const MONOSPACE_OPEN: &str = r#"<span class='bg-[#ddd] dark:bg-[#606060] dark:text-[#e0e0e0] px-1 rounded-lg text-lg' style='font-family: "Monaco", "Menlo", "Ubuntu Mono", "Consolas", "Source Code Pro", "source-code-pro", monospace'>"#;

/// A styling macro with its HTML expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `\verb|text|`
    Verb,
    /// `\texttt{text}`
    Texttt,
    /// `\textbf{text}`
    Bold,
    /// `\textit{text}`
    Italic,
    /// `\underline{text}`
    Underline,
    /// `\fontsize[size]{text}`
    FontSize,
    /// `\textsuperscript{text}`
    Superscript,
    /// `\textsubscript{text}`
    Subscript,
    /// `\indent[amount]{text}`
    Indent,
    /// `\centerline{text}`
    CenterLine,
    /// `\rightline{text}`
    RightLine,
    /// `\textcolor[color]{text}`
    TextColor,
}

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).expect("valid regex"));
    };
}

pattern!(VERB_RE, r"\\verb\|(.*?)\|");
pattern!(TEXTTT_RE, r"\\texttt\{(.*?)\}");
pattern!(TEXTBF_RE, r"\\textbf\{(.*?)\}");
pattern!(TEXTIT_RE, r"\\textit\{(.*?)\}");
pattern!(UNDERLINE_RE, r"\\underline\{(.*?)\}");
pattern!(FONTSIZE_RE, r"\\fontsize\[(.*?)\]\{(.*?)\}");
pattern!(SUPERSCRIPT_RE, r"\\textsuperscript\{(.*?)\}");
pattern!(SUBSCRIPT_RE, r"\\textsubscript\{(.*?)\}");
pattern!(INDENT_RE, r"\\indent\[(.*?)\]\{(.*?)\}");
pattern!(CENTERLINE_RE, r"\\centerline\{(.*?)\}");
pattern!(RIGHTLINE_RE, r"\\rightline\{(.*?)\}");
pattern!(TEXTCOLOR_RE, r"\\textcolor\[(.*?)\]\{(.*?)\}");

// An HTML tag or a bracket pair. Tags are matched only to be skipped.
pattern!(BLANK_RE, r"</?[A-Za-z][^<>]*>|\[(.*?)\]");

impl Style {
    /// All styles, in expansion order.
    pub const ALL: [Style; 12] = [
        Style::Verb,
        Style::Texttt,
        Style::Bold,
        Style::Italic,
        Style::Underline,
        Style::FontSize,
        Style::Superscript,
        Style::Subscript,
        Style::Indent,
        Style::CenterLine,
        Style::RightLine,
        Style::TextColor,
    ];

    /// Macro name without the leading backslash.
    pub fn name(&self) -> &'static str {
        match self {
            Style::Verb => "verb",
            Style::Texttt => "texttt",
            Style::Bold => "textbf",
            Style::Italic => "textit",
            Style::Underline => "underline",
            Style::FontSize => "fontsize",
            Style::Superscript => "textsuperscript",
            Style::Subscript => "textsubscript",
            Style::Indent => "indent",
            Style::CenterLine => "centerline",
            Style::RightLine => "rightline",
            Style::TextColor => "textcolor",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Style::Verb => &*VERB_RE,
            Style::Texttt => &*TEXTTT_RE,
            Style::Bold => &*TEXTBF_RE,
            Style::Italic => &*TEXTIT_RE,
            Style::Underline => &*UNDERLINE_RE,
            Style::FontSize => &*FONTSIZE_RE,
            Style::Superscript => &*SUPERSCRIPT_RE,
            Style::Subscript => &*SUBSCRIPT_RE,
            Style::Indent => &*INDENT_RE,
            Style::CenterLine => &*CENTERLINE_RE,
            Style::RightLine => &*RIGHTLINE_RE,
            Style::TextColor => &*TEXTCOLOR_RE,
        }
    }

    /// Build the HTML for one match. Two-argument macros carry the option in
    /// group 1 and the text in group 2.
    fn expand(&self, caps: &Captures<'_>) -> String {
        let first = &caps[1];
        match self {
            Style::Verb | Style::Texttt => format!("{}{}</span>", MONOSPACE_OPEN, first),
            Style::Bold => format!("<span class='font-bold'>{}</span>", first),
            Style::Italic => format!("<span class='italic'>{}</span>", first),
            Style::Underline => {
                format!("<span class='underline underline-offset-auto'>{}</span>", first)
            }
            Style::FontSize => format!("<span style='font-size: {}'>{}</span>", first, &caps[2]),
            Style::Superscript => format!("<sup>{}</sup>", first),
            Style::Subscript => format!("<sub>{}</sub>", first),
            Style::Indent => format!("<span style='margin-left: {}'>{}</span>", first, &caps[2]),
            Style::CenterLine => format!("<p class='text-center'>{}</p>", first),
            Style::RightLine => format!("<p class='text-right'>{}</p>", first),
            Style::TextColor => format!("<span style='color: {}'>{}</span>", first, &caps[2]),
        }
    }
}

/// Expand every occurrence of one styling macro.
pub fn expand_style(text: &str, style: Style) -> String {
    style
        .pattern()
        .replace_all(text, |caps: &Captures<'_>| style.expand(caps))
        .into_owned()
}

/// Replace `[...]` with numbered inputs, counting from 0 in reading order.
///
/// Brackets inside HTML tags (class names such as `bg-[#ddd]` emitted by
/// earlier stages) are not blanks.
pub fn expand_blanks(text: &str) -> String {
    let mut index = 0usize;
    BLANK_RE
        .replace_all(text, |caps: &Captures<'_>| {
            if caps.get(1).is_none() {
                return caps[0].to_string();
            }
            let input = format!(r#"<input id="replace" index={}></input>"#, index);
            index += 1;
            input
        })
        .into_owned()
}
