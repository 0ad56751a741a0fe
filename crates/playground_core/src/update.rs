use crate::{
    AppState, Effect, LifecycleCommand, LifecycleEvent, Msg, PositionId, Severity,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CredentialLoaded(value) => {
            let value = value.unwrap_or_default();
            let restored = !value.trim().is_empty();
            state.set_credential(value);
            if restored {
                vec![Effect::Notify {
                    severity: Severity::Info,
                    message: "Loaded saved API key".to_string(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::CredentialChanged(value) => {
            state.set_credential(value.clone());
            vec![Effect::PersistCredential { value }]
        }
        Msg::UrlInputChanged(value) => {
            state.set_url_input(value);
            Vec::new()
        }
        Msg::SubmitClicked => {
            let url = state.url_input().to_string();
            let credential = state.credential().to_string();
            match state.collection_mut().submit(&url, &credential) {
                Ok(position_id) => {
                    state.mark_dirty();
                    let mut effects = dispatch(&mut state, position_id, LifecycleEvent::Created);
                    effects.push(Effect::ScrollToTop);
                    effects
                }
                Err(err) => vec![Effect::Notify {
                    severity: Severity::Error,
                    message: err.to_string(),
                }],
            }
        }
        Msg::RetryClicked { position_id } => {
            if state.collection().by_position(position_id).is_none() {
                return (state, vec![missing_card(position_id)]);
            }
            dispatch(&mut state, position_id, LifecycleEvent::RetryRequested)
        }
        Msg::ToggleExpanded { position_id } => {
            match state.collection_mut().by_position_mut(position_id) {
                Some(item) => {
                    item.toggle_expanded();
                    state.mark_dirty();
                    Vec::new()
                }
                None => vec![missing_card(position_id)],
            }
        }
        Msg::ExtractionSucceeded {
            position_id,
            attempt,
            response,
        } => dispatch(
            &mut state,
            position_id,
            LifecycleEvent::ResponseReceived { attempt, response },
        ),
        Msg::ExtractionFailed {
            position_id,
            attempt,
            message,
        } => dispatch(
            &mut state,
            position_id,
            LifecycleEvent::ResponseFailed { attempt, message },
        ),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Feed one lifecycle event to the submission at `position_id` and turn the
/// resulting command into effects.
fn dispatch(state: &mut AppState, position_id: PositionId, event: LifecycleEvent) -> Vec<Effect> {
    let credential = state.credential().trim().to_string();
    let Some(item) = state.collection_mut().by_position_mut(position_id) else {
        return Vec::new();
    };
    let url = item.url().to_string();
    let Some(command) = item.lifecycle_mut().apply(event) else {
        return Vec::new();
    };
    state.mark_dirty();

    match command {
        LifecycleCommand::IssueRequest { attempt } => vec![Effect::ExtractRecipe {
            position_id,
            attempt,
            url,
            credential,
        }],
        LifecycleCommand::ReportTitle(title) => {
            if let Some(index) = state.collection().index_of(position_id) {
                state.collection_mut().update_display_name(index, title);
            }
            Vec::new()
        }
        LifecycleCommand::SurfaceError(message) => vec![Effect::Notify {
            severity: Severity::Error,
            message: format!("Error: {message}"),
        }],
    }
}

fn missing_card(position_id: PositionId) -> Effect {
    Effect::Notify {
        severity: Severity::Error,
        message: format!("No card #{position_id}"),
    }
}
