//! WebAssembly bindings for JavaScript/TypeScript.
//!
//! # Usage (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { renderLatex, tryRenderLatex, missingImages, RenderOptions } from 'quizmark';
//!
//! await init();
//!
//! const html = tryRenderLatex('Solve $x^2 = 4$', resources, 'SHORT_ANSWER');
//!
//! const options = new RenderOptions();
//! options.setMathBackend('passthrough');
//! const clientSide = renderLatex('Fill in: [blank]', null, 'FILL_IN_BLANK', options);
//!
//! const unused = missingImages(source, resources);
//! ```
//!
//! Build for the browser with `--no-default-features --features wasm`; math is
//! then left for client-side KaTeX (see `mathHeadContent`).

#![cfg(feature = "wasm")]

use crate::config::RenderConfig;
use crate::render::{MathBackend, Renderer};
use crate::resource::{QuestionType, Resource};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Render question markup to HTML.
///
/// # Arguments
///
/// * `input` - The question markup; `null`/`undefined` is empty markup.
/// * `resources` - Array of resource records, or `null`/`undefined`.
/// * `question_type` - Wire name such as `"FILL_IN_BLANK"`, or `null`.
/// * `options` - Optional configuration object.
///
/// # Errors
///
/// Returns an error if the arguments cannot be read or rendering fails.
#[wasm_bindgen(js_name = renderLatex)]
pub fn render_latex(
    input: Option<String>,
    resources: JsValue,
    question_type: Option<String>,
    options: Option<RenderOptions>,
) -> Result<String, JsError> {
    let resources = resources_from_js(resources)?;
    let question_type = question_type_from_js(question_type)?;

    renderer(options)
        .render(input.as_deref().unwrap_or_default(), resources.as_deref(), question_type)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Render question markup to HTML, returning the input unchanged on failure.
///
/// Unreadable resources or an unknown question type are treated as absent.
#[wasm_bindgen(js_name = tryRenderLatex)]
pub fn try_render_latex(
    input: Option<String>,
    resources: JsValue,
    question_type: Option<String>,
    options: Option<RenderOptions>,
) -> String {
    let resources = resources_from_js(resources).ok().flatten();
    let question_type = question_type.and_then(|name| name.parse::<QuestionType>().ok());

    renderer(options).try_render(
        input.as_deref().unwrap_or_default(),
        resources.as_deref(),
        question_type,
    )
}

/// `IMAGE` resources whose id does not occur in `input`.
#[wasm_bindgen(js_name = missingImages)]
pub fn missing_images(input: &str, resources: JsValue) -> Result<JsValue, JsError> {
    let resources = resources_from_js(resources)?.unwrap_or_default();
    let missing = crate::resolve::missing_images(input, &resources);

    serde_wasm_bindgen::to_value(&missing)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// HTML to place in `<head>` for the given math backend, if it needs any.
#[wasm_bindgen(js_name = mathHeadContent)]
pub fn math_head_content(options: Option<RenderOptions>) -> Option<String> {
    renderer(options).head_content()
}

/// Get the library version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn renderer(options: Option<RenderOptions>) -> Renderer {
    Renderer::new(options.map(|o| o.config).unwrap_or_default())
}

fn resources_from_js(value: JsValue) -> Result<Option<Vec<Resource>>, JsError> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| JsError::new(&format!("Invalid resources: {}", e)))
}

fn question_type_from_js(name: Option<String>) -> Result<Option<QuestionType>, JsError> {
    name.map(|name| name.parse::<QuestionType>().map_err(|e| JsError::new(&e)))
        .transpose()
}

/// Configuration options for rendering.
#[wasm_bindgen]
pub struct RenderOptions {
    config: RenderConfig,
}

#[wasm_bindgen]
impl RenderOptions {
    /// Create a new options object with defaults.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }

    /// Set the math rendering backend: "katex", "mathml", or "passthrough".
    /// Unknown names keep the current backend.
    #[wasm_bindgen(js_name = setMathBackend)]
    pub fn set_math_backend(&mut self, backend: &str) {
        if let Some(backend) = MathBackend::from_name(backend) {
            self.config.math_backend = backend;
        }
    }

    /// Set whether commas in math become line-break opportunities.
    #[wasm_bindgen(js_name = setCommaBreaks)]
    pub fn set_comma_breaks(&mut self, enabled: bool) {
        self.config.comma_breaks = enabled;
    }

    /// Set the default `max-height` (px) of `\pic` images.
    #[wasm_bindgen(js_name = setPictureMaxHeight)]
    pub fn set_picture_max_height(&mut self, px: u32) {
        self.config.picture_max_height = px;
    }

    /// Set the image shown for unknown `\includegraphics` ids.
    #[wasm_bindgen(js_name = setFallbackImage)]
    pub fn set_fallback_image(&mut self, url: &str, alt_text: &str) {
        self.config.fallback_image.url = url.to_string();
        self.config.fallback_image.alt_text = alt_text.to_string();
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

// TypeScript type definitions for documentation
/// ```typescript
/// // quizmark.d.ts
///
/// export type QuestionType =
///     "MULTIPLE_CHOICE" | "FREE_RESPONSE" | "SHORT_ANSWER" | "FILL_IN_BLANK" | "PARENT";
///
/// export interface Resource {
///     id?: string;
///     type: "LOGO" | "IMAGE" | "VIDEO" | "LONG_VIDEO" | "CODE" | "PDF";
///     data: { url: string; key?: string; index?: number; altText?: string }
///         | { language: "JAVA" | "C" | "PYTHON" | "TEXT"; content: string; index?: number };
/// }
///
/// export function renderLatex(input: string | null, resources?: Resource[] | null,
///     questionType?: QuestionType | null, options?: RenderOptions): string;
/// export function tryRenderLatex(input: string | null, resources?: Resource[] | null,
///     questionType?: QuestionType | null, options?: RenderOptions): string;
/// export function missingImages(input: string, resources: Resource[]): Resource[];
/// export function mathHeadContent(options?: RenderOptions): string | undefined;
/// export function getVersion(): string;
///
/// export class RenderOptions {
///     constructor();
///     setMathBackend(backend: "katex" | "mathml" | "passthrough"): void;
///     setCommaBreaks(enabled: boolean): void;
///     setPictureMaxHeight(px: number): void;
///     setFallbackImage(url: string, altText: string): void;
/// }
/// ```
const _: () = ();
