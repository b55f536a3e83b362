//! Outbound voice platform envelope.

use serde::Serialize;

const RESPONSE_VERSION: &str = "1.0";

/// Top-level response envelope returned to the voice platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub text: String,
}

/// Simple companion-app card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub card_type: String,
    pub title: String,
    pub content: String,
}

impl VoiceResponse {
    /// Plain-text spoken response.
    pub fn speak(text: impl Into<String>, should_end_session: bool) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: OutputSpeech {
                    speech_type: "PlainText".to_string(),
                    text: text.into(),
                },
                card: None,
                should_end_session,
            },
        }
    }

    /// Attaches a simple card showing the same content in the companion app.
    pub fn with_card(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.response.card = Some(Card {
            card_type: "Simple".to_string(),
            title: title.into(),
            content: content.into(),
        });
        self
    }

    pub fn text(&self) -> &str {
        &self.response.output_speech.text
    }

    pub fn ends_session(&self) -> bool {
        self.response.should_end_session
    }
}
