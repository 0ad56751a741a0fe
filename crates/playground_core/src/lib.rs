//! Playground core: pure state machine and view-model helpers.
mod collection;
mod effect;
mod lifecycle;
mod msg;
mod recipe;
mod source;
mod state;
mod update;
mod view_model;

pub use collection::{Collection, PositionId, Submission, ValidationError};
pub use effect::{Effect, Severity};
pub use lifecycle::{AttemptId, FetchLifecycle, FetchStatus, LifecycleCommand, LifecycleEvent};
pub use msg::Msg;
pub use recipe::{
    ExtractedRecipe, ExtractionResponse, Ingredient, Instruction, NutritionalInfo, Section,
    TokenUsage,
};
pub use source::{classify_source, SourceKind};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, SubmissionView};
