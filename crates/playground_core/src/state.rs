use crate::view_model::{AppViewModel, SubmissionView};
use crate::Collection;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    credential: String,
    url_input: String,
    collection: Collection,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            credential: self.credential.clone(),
            url_input: self.url_input.clone(),
            submissions: self
                .collection
                .iter()
                .map(|item| SubmissionView {
                    position_id: item.position_id(),
                    display_name: item.display_name().to_string(),
                    source_kind: item.source_kind(),
                    url: item.url().to_string(),
                    status: item.lifecycle().status(),
                    expanded: item.expanded(),
                    response: item.lifecycle().result().cloned(),
                    error: item.lifecycle().error_message().map(ToOwned::to_owned),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_credential(&mut self, value: String) {
        self.credential = value;
        self.mark_dirty();
    }

    pub(crate) fn set_url_input(&mut self, value: String) {
        self.url_input = value;
        self.mark_dirty();
    }

    pub(crate) fn collection_mut(&mut self) -> &mut Collection {
        &mut self.collection
    }
}
