//! VoiceCommandHandler - answers voice platform requests.
//!
//! Every request produces a well-formed response envelope. Upstream failures
//! become an apologetic spoken message and store failures are logged and
//! ignored, so the caller never sees a protocol-level error.

use std::sync::Arc;

use crate::domain::door::{phrase_duration, ButtonPressOutcome, DoorStatus};
use crate::domain::foundation::Timestamp;
use crate::domain::voice::{IntentName, RequestKind, VoiceRequest, VoiceResponse};
use crate::ports::{DeviceCloud, DOOR_STATUS_VARIABLE, PRESS_BUTTON_FUNCTION};

use super::DoorStateRecorder;

/// Spoken responses.
pub mod speech {
    pub const LAUNCH: &str =
        "Garage door controller ready. Say 'press button' to activate the garage door.";
    pub const PRESSED: &str =
        "Garage door button pressed. The relay has been activated for one second.";
    pub const ALREADY_ACTIVE: &str =
        "The garage door button is already active. Please wait and try again.";
    pub const PRESS_FAILED: &str =
        "Sorry, I couldn't communicate with the garage door opener. Please try again.";
    pub const STATUS_FAILED: &str =
        "Sorry, I couldn't get the garage door status. Please try again.";
    pub const HELP: &str = "You can say 'press button' to activate the garage door, or 'get status' to check if the door is open or closed.";
    pub const GOODBYE: &str = "Goodbye";
    pub const UNKNOWN_INTENT: &str = "I don't understand that command.";
    pub const UNKNOWN_REQUEST: &str = "I don't understand that request.";
}

const CARD_TITLE: &str = "Garage Door";

/// Handler for voice platform requests.
pub struct VoiceCommandHandler {
    device_cloud: Arc<dyn DeviceCloud>,
    recorder: DoorStateRecorder,
}

impl VoiceCommandHandler {
    pub fn new(device_cloud: Arc<dyn DeviceCloud>, recorder: DoorStateRecorder) -> Self {
        Self {
            device_cloud,
            recorder,
        }
    }

    pub async fn handle(&self, request: &VoiceRequest) -> VoiceResponse {
        self.handle_at(request, Timestamp::now()).await
    }

    /// Handles a request as if received at `now`.
    pub async fn handle_at(&self, request: &VoiceRequest, now: Timestamp) -> VoiceResponse {
        let kind = request.kind();
        tracing::info!(
            request_type = %request.request.request_type,
            intent = request.intent_name(),
            "Voice request"
        );

        match kind {
            RequestKind::Launch => VoiceResponse::speak(speech::LAUNCH, false),
            RequestKind::SessionEnded => VoiceResponse::speak(speech::GOODBYE, true),
            RequestKind::Intent(intent) => self.handle_intent(intent, now).await,
            RequestKind::Other(_) => VoiceResponse::speak(speech::UNKNOWN_REQUEST, true),
        }
    }

    async fn handle_intent(&self, intent: IntentName, now: Timestamp) -> VoiceResponse {
        match intent {
            IntentName::PressButton => self.press_button(now).await,
            IntentName::GetStatus => self.get_status(now).await,
            IntentName::Help => VoiceResponse::speak(speech::HELP, false),
            IntentName::Cancel | IntentName::Stop => VoiceResponse::speak(speech::GOODBYE, true),
            IntentName::Other(_) => VoiceResponse::speak(speech::UNKNOWN_INTENT, true),
        }
    }

    async fn press_button(&self, now: Timestamp) -> VoiceResponse {
        let response = match self
            .device_cloud
            .call_function(PRESS_BUTTON_FUNCTION, "")
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Failed to call pressButton");
                return VoiceResponse::speak(speech::PRESS_FAILED, true);
            }
        };

        let outcome = ButtonPressOutcome::from_return_value(response.return_value);
        tracing::info!(outcome = %outcome, "Button press");

        match outcome {
            ButtonPressOutcome::Pressed => {
                if let Err(e) = self.recorder.record_button_press(now).await {
                    tracing::warn!(error = %e, "Failed to record button press");
                }
                VoiceResponse::speak(speech::PRESSED, true).with_card(CARD_TITLE, speech::PRESSED)
            }
            ButtonPressOutcome::AlreadyActive => VoiceResponse::speak(speech::ALREADY_ACTIVE, true),
            ButtonPressOutcome::Rejected(_) => VoiceResponse::speak(speech::PRESS_FAILED, true),
        }
    }

    async fn get_status(&self, now: Timestamp) -> VoiceResponse {
        let raw = match self.device_cloud.read_variable(DOOR_STATUS_VARIABLE).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read door status");
                return VoiceResponse::speak(speech::STATUS_FAILED, true);
            }
        };
        let status = DoorStatus::parse(&raw);

        let duration_minutes = match self.recorder.reconcile(status.clone(), now).await {
            Ok(reconciliation) => {
                if let Err(e) = self.recorder.save(&reconciliation.next).await {
                    tracing::warn!(error = %e, "Failed to record door status");
                }
                reconciliation.duration_minutes
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to record door status");
                0
            }
        };

        let text = status_sentence(&status, duration_minutes);
        VoiceResponse::speak(text.clone(), true).with_card(CARD_TITLE, text)
    }
}

/// "The garage door is currently X." plus the open duration when open.
fn status_sentence(status: &DoorStatus, duration_minutes: i64) -> String {
    let phrase = if status.is_open() {
        phrase_duration(duration_minutes)
    } else {
        String::new()
    };

    if phrase.is_empty() {
        format!("The garage door is currently {}.", status)
    } else {
        format!(
            "The garage door is currently {}. It has been open for {}.",
            status, phrase
        )
    }
}
