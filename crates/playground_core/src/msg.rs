use crate::{AttemptId, ExtractionResponse, PositionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Credential read from storage at startup.
    CredentialLoaded(Option<String>),
    /// User edited the API key field.
    CredentialChanged(String),
    /// User edited the video URL field.
    UrlInputChanged(String),
    /// User clicked Parse.
    SubmitClicked,
    /// User clicked Retry on a card.
    RetryClicked { position_id: PositionId },
    /// User clicked a card header.
    ToggleExpanded { position_id: PositionId },
    /// Engine delivered a parsed response for an attempt.
    ExtractionSucceeded {
        position_id: PositionId,
        attempt: AttemptId,
        response: ExtractionResponse,
    },
    /// Engine reported a transport, status or decode failure for an attempt.
    ExtractionFailed {
        position_id: PositionId,
        attempt: AttemptId,
        message: String,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
