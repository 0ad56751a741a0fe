use crate::lifecycle::FetchLifecycle;
use crate::source::{classify_source, SourceKind};

/// Rendering identity of a submission: its 1-based creation ordinal.
///
/// Equals `len - index` for the submission's current index, so it stays
/// constant while newer submissions are prepended in front of it.
pub type PositionId = u64;

/// Reasons a submit request is rejected before any state is created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your API key")]
    MissingCredential,
    #[error("Please enter a video URL")]
    MissingUrl,
    #[error("Please enter a valid video URL")]
    InvalidUrl,
}

/// One user-initiated extraction request for a video URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    position_id: PositionId,
    display_name: String,
    source_kind: SourceKind,
    url: String,
    lifecycle: FetchLifecycle,
    expanded: bool,
}

impl Submission {
    pub fn position_id(&self) -> PositionId {
        self.position_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn lifecycle(&self) -> &FetchLifecycle {
        &self.lifecycle
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub(crate) fn lifecycle_mut(&mut self) -> &mut FetchLifecycle {
        &mut self.lifecycle
    }

    pub(crate) fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }
}

/// Ordered list of submissions, newest first.
///
/// Submissions are only ever prepended; nothing is removed or reordered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    items: Vec<Submission>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the inputs and prepend a new idle submission.
    ///
    /// The new item becomes position 0 and starts expanded; every older item
    /// is collapsed because it just moved away from the top.
    pub fn submit(&mut self, url: &str, credential: &str) -> Result<PositionId, ValidationError> {
        if credential.trim().is_empty() {
            return Err(ValidationError::MissingCredential);
        }
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        let source_kind = classify_source(url).ok_or(ValidationError::InvalidUrl)?;

        for item in &mut self.items {
            item.expanded = false;
        }

        let position_id = self.items.len() as PositionId + 1;
        self.items.insert(
            0,
            Submission {
                position_id,
                display_name: source_kind.placeholder_name().to_string(),
                source_kind,
                url: url.to_string(),
                lifecycle: FetchLifecycle::new(),
                expanded: true,
            },
        );
        Ok(position_id)
    }

    /// Overwrite the display name of the submission currently at `index`.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn update_display_name(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.display_name = name.into();
                true
            }
            None => false,
        }
    }

    /// Current index of the submission with `position_id`.
    pub fn index_of(&self, position_id: PositionId) -> Option<usize> {
        let len = self.items.len() as PositionId;
        if position_id == 0 || position_id > len {
            return None;
        }
        Some((len - position_id) as usize)
    }

    pub fn get(&self, index: usize) -> Option<&Submission> {
        self.items.get(index)
    }

    pub fn by_position(&self, position_id: PositionId) -> Option<&Submission> {
        self.index_of(position_id).and_then(|index| self.items.get(index))
    }

    pub(crate) fn by_position_mut(&mut self, position_id: PositionId) -> Option<&mut Submission> {
        let index = self.index_of(position_id)?;
        self.items.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.items.iter()
    }
}
