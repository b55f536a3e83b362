//! Inbound voice platform envelope.
//!
//! Only the fields the command handler reads are modelled; everything else in
//! the platform payload is ignored.

use serde::Deserialize;

/// Top-level request envelope sent by the voice platform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Option<VoiceSession>,
    #[serde(default)]
    pub request: RequestBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSession {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type", default)]
    pub request_type: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub intent: Option<Intent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: String,
}

/// Kind of request, from `request.type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Launch,
    Intent(IntentName),
    SessionEnded,
    Other(String),
}

/// Intents the skill understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentName {
    PressButton,
    GetStatus,
    Help,
    Cancel,
    Stop,
    Other(String),
}

impl IntentName {
    pub fn parse(name: &str) -> Self {
        match name {
            "PressButtonIntent" => IntentName::PressButton,
            "GetStatusIntent" => IntentName::GetStatus,
            "AMAZON.HelpIntent" => IntentName::Help,
            "AMAZON.CancelIntent" => IntentName::Cancel,
            "AMAZON.StopIntent" => IntentName::Stop,
            other => IntentName::Other(other.to_string()),
        }
    }
}

impl VoiceRequest {
    /// Decodes a raw request body.
    ///
    /// Bodies that are not valid envelopes decode to an empty request, which
    /// classifies as an unknown request kind rather than failing.
    pub fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn kind(&self) -> RequestKind {
        match self.request.request_type.as_str() {
            "LaunchRequest" => RequestKind::Launch,
            "IntentRequest" => RequestKind::Intent(IntentName::parse(self.intent_name())),
            "SessionEndedRequest" => RequestKind::SessionEnded,
            other => RequestKind::Other(other.to_string()),
        }
    }

    /// Raw intent name, empty when absent.
    pub fn intent_name(&self) -> &str {
        self.request
            .intent
            .as_ref()
            .map(|i| i.name.as_str())
            .unwrap_or("")
    }
}
