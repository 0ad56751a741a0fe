use crate::{ExtractionResponse, FetchStatus, PositionId, SourceKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub credential: String,
    pub url_input: String,
    pub submissions: Vec<SubmissionView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionView {
    pub position_id: PositionId,
    pub display_name: String,
    pub source_kind: SourceKind,
    pub url: String,
    pub status: FetchStatus,
    pub expanded: bool,
    pub response: Option<ExtractionResponse>,
    pub error: Option<String>,
}
