//! C FFI layer for cross-language interoperability.
//!
//! Resources cross the boundary as a JSON array in the web application's
//! shape (`{"id": …, "type": "IMAGE", "data": {"url": …}}`) and question
//! types as their wire names (`"FILL_IN_BLANK"`). A null pointer for either
//! means "absent"; a null markup pointer means empty markup.

use crate::error::{Error, Result};
use crate::render::Renderer;
use crate::resource::{resources_from_json, QuestionType, Resource};
use libc::c_char;
use std::ffi::{CStr, CString};
use std::ptr;

/// Result type for FFI operations.
#[repr(C)]
pub struct QuizmarkResult {
    /// Pointer to result string (caller must free with quizmark_free_string)
    pub data: *mut c_char,
    /// Error message if data is null (caller must free with quizmark_free_string)
    pub error: *mut c_char,
}

impl QuizmarkResult {
    fn ok(data: String) -> Self {
        Self {
            data: into_c_string(data),
            error: ptr::null_mut(),
        }
    }

    fn err(error: String) -> Self {
        let error = if error.is_empty() { "Unknown error".to_string() } else { error };
        Self {
            data: ptr::null_mut(),
            error: into_c_string(error),
        }
    }
}

/// Hand a string to the caller. A string with an interior NUL is handed over
/// as empty.
fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Read an optional C string. Null means `None`.
unsafe fn optional_str<'a>(s: *const c_char, what: &str) -> Result<Option<&'a str>> {
    if s.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(s)
        .to_str()
        .map(Some)
        .map_err(|_| Error::Json(format!("Invalid UTF-8 in {}", what)))
}

/// Decode the arguments shared by the render entry points.
unsafe fn render_args<'a>(
    resources_json: *const c_char,
    question_type: *const c_char,
) -> Result<(Option<Vec<Resource>>, Option<QuestionType>)> {
    let resources = optional_str(resources_json, "resources")?
        .map(resources_from_json)
        .transpose()?;
    let question_type = optional_str(question_type, "question type")?
        .map(|name| name.parse::<QuestionType>().map_err(Error::Json))
        .transpose()?;
    Ok((resources, question_type))
}

/// Render question markup to HTML. A null `input` renders as empty markup.
///
/// # Safety
///
/// - `input`, `resources_json` and `question_type` must each be null or a
///   valid null-terminated UTF-8 string.
/// - The returned result must be freed with `quizmark_free_result`.
#[no_mangle]
pub unsafe extern "C" fn quizmark_render(
    input: *const c_char,
    resources_json: *const c_char,
    question_type: *const c_char,
) -> QuizmarkResult {
    let input = match optional_str(input, "input") {
        Ok(s) => s.unwrap_or_default(),
        Err(_) => return QuizmarkResult::err("Invalid UTF-8 input".to_string()),
    };

    let (resources, question_type) = match render_args(resources_json, question_type) {
        Ok(args) => args,
        Err(e) => return QuizmarkResult::err(e.to_string()),
    };

    match Renderer::default().render(input, resources.as_deref(), question_type) {
        Ok(html) => QuizmarkResult::ok(html),
        Err(e) => QuizmarkResult::err(e.to_string()),
    }
}

/// Render question markup to HTML, returning the input unchanged on failure.
///
/// Malformed `resources_json` or an unknown `question_type` are treated as
/// absent. Returns null only when `input` is not UTF-8.
///
/// # Safety
///
/// - Same pointer requirements as `quizmark_render`.
/// - The returned string must be freed with `quizmark_free_string`.
#[no_mangle]
pub unsafe extern "C" fn quizmark_try_render(
    input: *const c_char,
    resources_json: *const c_char,
    question_type: *const c_char,
) -> *mut c_char {
    let input = match optional_str(input, "input") {
        Ok(s) => s.unwrap_or_default(),
        Err(_) => return ptr::null_mut(),
    };

    let resources = optional_str(resources_json, "resources")
        .ok()
        .flatten()
        .and_then(|json| resources_from_json(json).ok());
    let question_type = optional_str(question_type, "question type")
        .ok()
        .flatten()
        .and_then(|name| name.parse::<QuestionType>().ok());

    into_c_string(Renderer::default().try_render(input, resources.as_deref(), question_type))
}

/// List the `IMAGE` resources whose id does not occur in `input`, as a JSON
/// array of resources.
///
/// # Safety
///
/// - `input` and `resources_json` must be valid null-terminated UTF-8 strings.
/// - The returned result must be freed with `quizmark_free_result`.
#[no_mangle]
pub unsafe extern "C" fn quizmark_missing_images(
    input: *const c_char,
    resources_json: *const c_char,
) -> QuizmarkResult {
    if input.is_null() || resources_json.is_null() {
        return QuizmarkResult::err("Null input pointer".to_string());
    }

    let (input, json) = match (
        CStr::from_ptr(input).to_str(),
        CStr::from_ptr(resources_json).to_str(),
    ) {
        (Ok(input), Ok(json)) => (input, json),
        _ => return QuizmarkResult::err("Invalid UTF-8 input".to_string()),
    };

    let resources = match resources_from_json(json) {
        Ok(r) => r,
        Err(e) => return QuizmarkResult::err(e.to_string()),
    };

    let missing = crate::resolve::missing_images(input, &resources);
    match serde_json::to_string(&missing) {
        Ok(json) => QuizmarkResult::ok(json),
        Err(e) => QuizmarkResult::err(Error::from(e).to_string()),
    }
}

/// Free a string returned by quizmark functions.
///
/// # Safety
///
/// - `s` must be a pointer returned by a quizmark function, or null.
#[no_mangle]
pub unsafe extern "C" fn quizmark_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Free a result struct.
///
/// # Safety
///
/// - `result` must be a valid QuizmarkResult.
#[no_mangle]
pub unsafe extern "C" fn quizmark_free_result(result: QuizmarkResult) {
    quizmark_free_string(result.data);
    quizmark_free_string(result.error);
}

/// Get the library version.
///
/// The returned string is static and must not be freed.
#[no_mangle]
pub extern "C" fn quizmark_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}

// Generate C header content for documentation
/// ```c
/// // quizmark.h
/// #ifndef QUIZMARK_H
/// #define QUIZMARK_H
///
/// typedef struct {
///     char* data;
///     char* error;
/// } QuizmarkResult;
///
/// // resources_json: JSON array of resources, or NULL
/// // question_type: e.g. "FILL_IN_BLANK", or NULL
/// QuizmarkResult quizmark_render(const char* input, const char* resources_json, const char* question_type);
/// char* quizmark_try_render(const char* input, const char* resources_json, const char* question_type);
/// QuizmarkResult quizmark_missing_images(const char* input, const char* resources_json);
/// void quizmark_free_string(char* s);
/// void quizmark_free_result(QuizmarkResult result);
/// const char* quizmark_version(void);
///
/// #endif
/// ```
const _: () = ();
