//! # quizmark
//!
//! Renders the LaTeX-flavoured markup used in exam questions to HTML: math,
//! styling macros, pictures, image resources and fill-in-blank inputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use quizmark::{try_render_latex, QuestionType};
//!
//! let html = try_render_latex(
//!     "Name the \\textbf{capital} of France: [blank]",
//!     None,
//!     Some(QuestionType::FillInBlank),
//! );
//! assert!(html.contains("<span class='font-bold'>capital</span>"));
//! assert!(html.contains(r#"<input id="replace" index=0></input>"#));
//! ```
//!
//! ## Syntax Reference
//!
//! ### Math
//!
//! - Inline: `$x^2$` or `\(x^2\)`
//! - Display: `$$\int_0^1 x\,dx$$` or `\[\int_0^1 x\,dx\]`
//! - Coordinates: `point \(1,2\)` renders as `(1, 2)`
//! - A literal dollar sign is written `\$`
//!
//! Commas inside math become line-break opportunities.
//!
//! ### Styling
//!
//! ```text
//! \verb|code|  \texttt{code}  \textbf{bold}  \textit{italic}  \underline{text}
//! \fontsize[20px]{text}  \textsuperscript{2}  \textsubscript{2}  \indent[2em]{text}
//! \centerline{text}  \rightline{text}  \textcolor[red]{text}
//! ```
//!
//! ### Pictures and Resources
//!
//! - `\pic{"url": "https://…", "alt": "…", "maxHeight": 200, "isInline": false}`
//! - `\includegraphics{resource-id}` looks the id up among the `IMAGE`
//!   resources passed in; unknown ids show a "not found" image.
//!
//! ### Blanks
//!
//! For `FILL_IN_BLANK` questions every `[...]` becomes a numbered input.
//!
//! ## Configuration
//!
//! See [`RenderConfig`]. Math backends:
//!
//! - `KaTeX` (default): server-side typesetting (requires the `katex` feature)
//! - `MathML`: native browser rendering (requires the `mathml` feature)
//! - `Passthrough`: leaves TeX for client-side KaTeX
//!
//! ## FFI
//!
//! A C-compatible FFI is provided for other languages; see the `ffi` module.
//!
//! ## Features
//!
//! - `katex` (default): server-side KaTeX backend
//! - `mathml`: MathML backend (requires `latex2mathml` crate)
//! - `wasm`: WebAssembly bindings (requires `wasm-bindgen`)

pub mod config;
pub mod error;
pub mod render;
pub mod resolve;
pub mod resource;

// FFI module (compiled for cdylib on native targets)
#[cfg(not(target_arch = "wasm32"))]
pub mod ffi;

// WASM module (only with feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Convenience re-exports
pub use config::RenderConfig;
pub use error::{ConfigError, Error, RenderError, Result};
pub use render::{MathBackend, MathRenderer, Renderer};
pub use resource::{QuestionType, Resource, ResourceData, ResourceType, UrlResourceData};

/// Render question markup to HTML with the default configuration.
///
/// # Example
///
/// ```rust
/// use quizmark::render_latex;
///
/// let html = render_latex("\\textit{Note:}\nread twice", None, None).unwrap();
/// assert_eq!(html, "<span class='italic'>Note:</span> <br /> read twice");
/// ```
pub fn render_latex(
    input: &str,
    resources: Option<&[Resource]>,
    question_type: Option<QuestionType>,
) -> Result<String> {
    Renderer::default().render(input, resources, question_type)
}

/// Like [`render_latex`], but returns `input` unchanged when rendering fails.
pub fn try_render_latex(
    input: &str,
    resources: Option<&[Resource]>,
    question_type: Option<QuestionType>,
) -> String {
    Renderer::default().try_render(input, resources, question_type)
}

/// `IMAGE` resources whose id is not mentioned anywhere in `input`.
pub fn missing_images<'a>(input: &str, resources: &'a [Resource]) -> Vec<&'a Resource> {
    resolve::missing_images(input, resources)
}
