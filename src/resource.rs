//! Caller-supplied records: resources referenced from markup, and question types.
//!
//! The JSON shape mirrors the records the surrounding application stores, so a
//! resource list can be passed through FFI or WASM as-is:
//!
//! ```json
//! { "id": "fig-1", "type": "IMAGE", "data": { "url": "https://…", "altText": "A graph" } }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of asset a resource describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Logo,
    Image,
    Video,
    LongVideo,
    Code,
    Pdf,
}

impl ResourceType {
    /// Wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Logo => "LOGO",
            ResourceType::Image => "IMAGE",
            ResourceType::Video => "VIDEO",
            ResourceType::LongVideo => "LONG_VIDEO",
            ResourceType::Code => "CODE",
            ResourceType::Pdf => "PDF",
        }
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOGO" => Ok(ResourceType::Logo),
            "IMAGE" => Ok(ResourceType::Image),
            "VIDEO" => Ok(ResourceType::Video),
            "LONG_VIDEO" => Ok(ResourceType::LongVideo),
            "CODE" => Ok(ResourceType::Code),
            "PDF" => Ok(ResourceType::Pdf),
            other => Err(format!("unknown resource type: {}", other)),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language of a code resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CodingLanguage {
    Java,
    C,
    Python,
    Text,
}

/// Payload of a URL-backed resource (images, logos, videos, PDFs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResourceData {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// Payload of a code resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeResourceData {
    pub language: CodingLanguage,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Type-specific resource payload.
///
/// Code payloads are tried first: an object carrying `language` and `content`
/// is code, anything with a `url` is a URL payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceData {
    Code(CodeResourceData),
    Url(UrlResourceData),
}

/// A caller-owned asset record, referenceable by id from markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub data: ResourceData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_choice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_id: Option<String>,
}

impl Resource {
    /// An `IMAGE` resource pointing at `url`.
    pub fn image(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            kind: ResourceType::Image,
            data: ResourceData::Url(UrlResourceData {
                url: url.into(),
                ..Default::default()
            }),
            application_id: None,
            question_id: None,
            explanation_id: None,
            answer_choice_id: None,
            exam_id: None,
        }
    }

    /// Set the alt text of a URL payload. No effect on code payloads.
    pub fn with_alt_text(mut self, alt: impl Into<String>) -> Self {
        if let ResourceData::Url(ref mut data) = self.data {
            data.alt_text = Some(alt.into());
        }
        self
    }

    /// The URL payload, if this resource has one.
    pub fn url_data(&self) -> Option<&UrlResourceData> {
        match &self.data {
            ResourceData::Url(data) => Some(data),
            ResourceData::Code(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == ResourceType::Image
    }
}

/// Parse a JSON array of resources.
pub fn resources_from_json(json: &str) -> crate::Result<Vec<Resource>> {
    Ok(serde_json::from_str(json)?)
}

/// Rendering mode of the question the markup belongs to.
///
/// Only [`QuestionType::FillInBlank`] changes what the pipeline emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    FreeResponse,
    ShortAnswer,
    FillInBlank,
    Parent,
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MULTIPLE_CHOICE" => Ok(QuestionType::MultipleChoice),
            "FREE_RESPONSE" => Ok(QuestionType::FreeResponse),
            "SHORT_ANSWER" => Ok(QuestionType::ShortAnswer),
            "FILL_IN_BLANK" => Ok(QuestionType::FillInBlank),
            "PARENT" => Ok(QuestionType::Parent),
            other => Err(format!("unknown question type: {}", other)),
        }
    }
}
