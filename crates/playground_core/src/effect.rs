use crate::{AttemptId, PositionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one extraction request.
    ExtractRecipe {
        position_id: PositionId,
        attempt: AttemptId,
        url: String,
        credential: String,
    },
    /// Write the credential to persistent storage.
    PersistCredential { value: String },
    /// Transient notification (toast).
    Notify { severity: Severity, message: String },
    ScrollToTop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}
