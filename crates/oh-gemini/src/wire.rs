//! JSON shapes of the `generateContent` endpoint.

use oh_core::ObjectSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfigWire<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfigWire<'a> {
    aspect_ratio: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// A prompt whose reply must be JSON matching `schema`.
    pub(crate) fn structured(prompt: &'a str, schema: &ObjectSchema) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json"),
                response_schema: Some(schema_json(schema)),
                ..GenerationConfig::default()
            },
        }
    }

    /// A prompt for a single image at `aspect_ratio`.
    pub(crate) fn image(prompt: &'a str, aspect_ratio: &'a str) -> Self {
        Self {
            contents: vec![Content::text(prompt)],
            generation_config: GenerationConfig {
                image_config: Some(ImageConfigWire { aspect_ratio }),
                ..GenerationConfig::default()
            },
        }
    }
}

impl<'a> Content<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            parts: vec![TextPart { text }],
        }
    }
}

/// Render an [`ObjectSchema`] in the API's OpenAPI-subset dialect.
pub(crate) fn schema_json(schema: &ObjectSchema) -> Value {
    let properties: Map<String, Value> = schema
        .properties()
        .iter()
        .map(|name| (name.clone(), json!({ "type": "STRING" })))
        .collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": schema.required(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

/// Base64-encoded binary payload of a response part.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    #[serde(default)]
    pub(crate) mime_type: Option<String>,
    pub(crate) data: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text parts of the first candidate, if it has any.
    pub(crate) fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self.parts().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// The first part of the first candidate that carries inline data.
    pub(crate) fn first_inline_data(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Message of a Google API error envelope, or the raw body.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_request_shape() {
        let req = GenerateContentRequest::structured("write a card", &ObjectSchema::card_prompt());
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "write a card");
        let config = &value["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            config["responseSchema"]["properties"]["imagePrompt"]["type"],
            "STRING"
        );
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["quote", "imagePrompt"])
        );
        assert!(config.get("imageConfig").is_none());
    }

    #[test]
    fn image_request_shape() {
        let req = GenerateContentRequest::image("soft blue watercolor", "3:4");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "soft blue watercolor");
        assert_eq!(value["generationConfig"]["imageConfig"]["aspectRatio"], "3:4");
        assert!(value["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn text_concatenates_first_candidate_parts() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"{\"quote\":"},{"text":"\"静待花开\"}"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.text().as_deref(), Some(r#"{"quote":"静待花开"}"#));
    }

    #[test]
    fn empty_response_has_no_text_or_image() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.text(), None);
        assert!(resp.first_inline_data().is_none());

        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(resp.text(), None);
    }

    #[test]
    fn first_inline_image_skips_text_parts() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Here is your image"},
                {"inlineData":{"mimeType":"image/png","data":"AAEC"}},
                {"inlineData":{"mimeType":"image/png","data":"ZZZZ"}}
            ]}}]}"#,
        )
        .unwrap();
        let inline = resp.first_inline_data().unwrap();
        assert_eq!(inline.data, "AAEC");
        assert_eq!(inline.mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn error_message_from_envelope_or_body() {
        assert_eq!(
            error_message(r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#),
            "API key not valid"
        );
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }
}
