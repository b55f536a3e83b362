//! Voice module - request and response envelopes of the voice platform.

mod request;
mod response;

pub use request::{Intent, IntentName, RequestBody, RequestKind, VoiceRequest, VoiceSession};
pub use response::{Card, OutputSpeech, ResponseBody, VoiceResponse};
