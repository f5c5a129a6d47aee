use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fallback shown when the backend envelope carries no usable brief or error text.
pub const GENERATE_FALLBACK_MESSAGE: &str = "Failed to generate SEO brief";

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefCandidate {
    pub title: String,
    pub target_audience: String,
    #[serde(default)]
    pub primary_keywords: Vec<String>,
    #[serde(default)]
    pub secondary_keywords: Vec<String>,
}

/// A brief request that passed validation.
///
/// Only [`BriefCandidate::into_request`](crate::api::models::BriefCandidate::into_request)
/// builds one, so holding a `BriefRequest` means every field constraint holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BriefRequest {
    title: String,
    target_audience: String,
    primary_keywords: Vec<String>,
    secondary_keywords: Vec<String>,
}

impl BriefRequest {
    pub(crate) fn from_validated(candidate: BriefCandidate) -> Self {
        BriefRequest {
            title: candidate.title,
            target_audience: candidate.target_audience,
            primary_keywords: candidate.primary_keywords,
            secondary_keywords: candidate.secondary_keywords,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    pub fn primary_keywords(&self) -> &[String] {
        &self.primary_keywords
    }

    pub fn secondary_keywords(&self) -> &[String] {
        &self.secondary_keywords
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoBrief {
    pub meta_title: String,
    pub meta_description: String,
    pub h1_suggestion: String,
    pub word_count_recommendation: u32,
    pub content_outline: Vec<String>,
    pub keyword_placement_tips: Vec<String>,
    pub internal_linking_suggestions: Vec<String>,
}

/// Response envelope returned by the backend.
///
/// `B` fixes the brief shape of the deployment: [`SeoBrief`] for the structured
/// backend, `String` for the backend that returns one formatted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefResponse<B = SeoBrief> {
    #[serde(default)]
    pub success: bool,
    pub brief: Option<B>,
    pub error: Option<String>,
}

impl<B> BriefResponse<B> {
    pub fn ok(brief: B) -> Self {
        BriefResponse {
            success: true,
            brief: Some(brief),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        BriefResponse {
            success: false,
            brief: None,
            error: Some(message.into()),
        }
    }

    /// Returns the brief only when the envelope says `success` and actually carries one.
    pub fn into_brief(self) -> std::result::Result<B, String> {
        match (self.success, self.brief) {
            (true, Some(brief)) => Ok(brief),
            _ => Err(self
                .error
                .filter(|msg| !msg.is_empty())
                .unwrap_or_else(|| GENERATE_FALLBACK_MESSAGE.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Body the relay answers with when it cannot reach the backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorEnvelope {
            success: false,
            error: error.into(),
        }
    }
}
