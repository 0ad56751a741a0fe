//! Playground engine: extraction requests and effect execution.
mod engine;
mod extract;
mod types;

pub use engine::{EngineEvents, EngineHandle};
pub use extract::{ExtractionSettings, RecipeExtractor, ReqwestExtractor};
pub use types::{EngineError, EngineEvent, ExtractionJob, FailureKind, FetchError};
