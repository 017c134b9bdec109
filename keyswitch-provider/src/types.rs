//! `generateContent` request and response types

use serde::{Deserialize, Serialize};

/// Output modality requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Text,
    Image,
}

/// Base64 payload with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl InlineData {
    /// Render as a `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Parse either a `data:<mime>;base64,<payload>` URL or a bare base64 payload.
    ///
    /// Bare payloads are sniffed for the JPEG magic bytes (`/9j/` once encoded);
    /// everything else is assumed to be PNG.
    #[must_use]
    pub fn from_base64(input: &str) -> Self {
        if let Some((header, data)) = input.split_once(',') {
            let mime_type = header
                .strip_prefix("data:")
                .and_then(|rest| rest.split(';').next())
                .filter(|mime| !mime.is_empty())
                .unwrap_or("image/png");
            return Self {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            };
        }

        let mime_type = if input.starts_with("/9j/") {
            "image/jpeg"
        } else {
            "image/png"
        };
        Self {
            mime_type: mime_type.to_string(),
            data: input.to_string(),
        }
    }
}

/// One part of a content turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    #[must_use]
    pub fn inline(data: InlineData) -> Self {
        Self {
            text: None,
            inline_data: Some(data),
        }
    }
}

/// A content turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<Modality>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Body of a `models/{model}:generateContent` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn text prompt.
    #[must_use]
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::from_parts(vec![Part::text(prompt)])
    }

    #[must_use]
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: None,
        }
    }

    #[must_use]
    pub fn with_modalities(mut self, modalities: Vec<Modality>) -> Self {
        self.generation_config
            .get_or_insert_with(GenerationConfig::default)
            .response_modalities = Some(modalities);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCandidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Response of a `generateContent` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate, if it has any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Inline images of the first candidate as `data:` URLs.
    #[must_use]
    pub fn image_data_urls(&self) -> Vec<String> {
        self.first_parts()
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .filter(|d| !d.data.is_empty())
            .map(InlineData::to_data_url)
            .collect()
    }

    /// Reason the prompt or the first candidate was blocked, if any.
    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Some(reason);
        }
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|reason| matches!(*reason, "SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateContentRequest::from_prompt("draw a cat")
            .with_modalities(vec![Modality::Image, Modality::Text]);
        let json = serde_json::to_value(&request).unwrap_or_default();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "draw a cat");
        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE", "TEXT"])
        );
        assert!(json["contents"][0]["parts"][0].get("inlineData").is_none());
    }

    #[test]
    fn response_text_and_images() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "Here "},
                    {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                    {"text": "you go"},
                    {"inlineData": {"mimeType": "image/png", "data": ""}}
                ]},
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap_or_default();
        assert_eq!(response.text().as_deref(), Some("Here you go"));
        assert_eq!(response.image_data_urls(), vec!["data:image/png;base64,AAAA"]);
        assert_eq!(response.block_reason(), None);
    }

    #[test]
    fn empty_response_has_no_output() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap_or_default();
        assert_eq!(response.text(), None);
        assert!(response.image_data_urls().is_empty());
    }

    #[test]
    fn block_reason_from_feedback_or_finish() {
        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
                .unwrap_or_default();
        assert_eq!(blocked.block_reason(), Some("SAFETY"));

        let finished: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "PROHIBITED_CONTENT"}]}"#)
                .unwrap_or_default();
        assert_eq!(finished.block_reason(), Some("PROHIBITED_CONTENT"));

        let normal: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#)
                .unwrap_or_default();
        assert_eq!(normal.block_reason(), None);
    }

    #[test]
    fn inline_data_from_data_url() {
        let data = InlineData::from_base64("data:image/webp;base64,UklGR");
        assert_eq!(data.mime_type, "image/webp");
        assert_eq!(data.data, "UklGR");
    }

    #[test]
    fn inline_data_sniffs_bare_payload() {
        assert_eq!(InlineData::from_base64("/9j/4AAQ").mime_type, "image/jpeg");
        assert_eq!(InlineData::from_base64("iVBORw0K").mime_type, "image/png");
    }
}
