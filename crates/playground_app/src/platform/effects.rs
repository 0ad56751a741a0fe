use std::sync::mpsc;
use std::thread;

use playground_core::{Effect, Msg};
use playground_engine::{EngineEvent, EngineEvents, EngineHandle, ExtractionJob};
use playground_logging::{pg_debug, pg_error, pg_info};

use super::app::AppEvent;
use super::persistence::CredentialStore;

/// Executes the IO side of effects: extraction requests and credential writes.
pub struct EffectRunner {
    engine: EngineHandle,
    store: Box<dyn CredentialStore>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        events: EngineEvents,
        store: Box<dyn CredentialStore>,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        spawn_event_loop(events, app_tx);
        Self { engine, store }
    }

    pub fn load_credential(&self) -> Option<String> {
        self.store.load()
    }

    /// Runs the effects this runner owns and hands back the ones that belong
    /// to the front end (notifications, scrolling).
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut remaining = Vec::new();
        for effect in effects {
            match effect {
                Effect::ExtractRecipe {
                    position_id,
                    attempt,
                    url,
                    credential,
                } => {
                    pg_info!(
                        "ExtractRecipe position_id={} attempt={} url_len={}",
                        position_id,
                        attempt,
                        url.len()
                    );
                    self.engine.enqueue(ExtractionJob {
                        position_id,
                        attempt,
                        url,
                        credential,
                    });
                }
                Effect::PersistCredential { value } => {
                    if let Err(err) = self.store.save(&value) {
                        pg_error!("Failed to persist credential: {}", err);
                    }
                }
                Effect::Notify { .. } | Effect::ScrollToTop => remaining.push(effect),
            }
        }
        remaining
    }
}

fn spawn_event_loop(events: EngineEvents, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if app_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
        pg_debug!("engine event loop finished");
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionCompleted {
            position_id,
            attempt,
            result,
        } => match result {
            Ok(response) => {
                pg_info!(
                    "Extraction completed position_id={} attempt={} title={:?}",
                    position_id,
                    attempt,
                    response.recipe.title
                );
                Msg::ExtractionSucceeded {
                    position_id,
                    attempt,
                    response,
                }
            }
            Err(err) => {
                pg_info!(
                    "Extraction completed with error position_id={} attempt={}: {}",
                    position_id,
                    attempt,
                    err
                );
                Msg::ExtractionFailed {
                    position_id,
                    attempt,
                    message: err.to_string(),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use playground_core::{ExtractionResponse, Severity};
    use playground_engine::{FailureKind, FetchError, RecipeExtractor};

    use super::*;
    use crate::platform::persistence::memory::MemoryCredentialStore;

    struct EchoExtractor;

    #[async_trait::async_trait]
    impl RecipeExtractor for EchoExtractor {
        async fn extract(
            &self,
            video_url: &str,
            credential: &str,
        ) -> Result<ExtractionResponse, FetchError> {
            if credential.is_empty() {
                return Err(FetchError {
                    kind: FailureKind::HttpStatus(401),
                    message: "Network response was not ok (401 Unauthorized)".into(),
                });
            }
            Ok(ExtractionResponse::titled(video_url))
        }
    }

    fn runner() -> (EffectRunner, MemoryCredentialStore, mpsc::Receiver<AppEvent>) {
        let (engine, events) =
            EngineHandle::with_extractor(Arc::new(EchoExtractor)).expect("engine");
        let store = MemoryCredentialStore::default();
        let (app_tx, app_rx) = mpsc::channel();
        let runner = EffectRunner::new(engine, events, Box::new(store.clone()), app_tx);
        (runner, store, app_rx)
    }

    fn next_msg(rx: &mpsc::Receiver<AppEvent>) -> Msg {
        match rx.recv_timeout(Duration::from_secs(5)).expect("app event") {
            AppEvent::Msg(msg) => msg,
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn persist_effect_writes_store() {
        let (runner, store, _rx) = runner();
        let rest = runner.run(vec![Effect::PersistCredential {
            value: "abc".into(),
        }]);
        assert!(rest.is_empty());
        assert_eq!(store.current().as_deref(), Some("abc"));
        assert_eq!(runner.load_credential().as_deref(), Some("abc"));
    }

    #[test]
    fn extraction_result_comes_back_as_msg() {
        let (runner, _store, rx) = runner();
        runner.run(vec![Effect::ExtractRecipe {
            position_id: 4,
            attempt: 2,
            url: "https://youtu.be/xyz".into(),
            credential: "key".into(),
        }]);

        assert_eq!(
            next_msg(&rx),
            Msg::ExtractionSucceeded {
                position_id: 4,
                attempt: 2,
                response: ExtractionResponse::titled("https://youtu.be/xyz"),
            }
        );
    }

    #[test]
    fn extraction_failure_carries_error_text() {
        let (runner, _store, rx) = runner();
        runner.run(vec![Effect::ExtractRecipe {
            position_id: 1,
            attempt: 1,
            url: "https://youtu.be/xyz".into(),
            credential: String::new(),
        }]);

        assert_eq!(
            next_msg(&rx),
            Msg::ExtractionFailed {
                position_id: 1,
                attempt: 1,
                message: "Network response was not ok (401 Unauthorized)".into(),
            }
        );
    }

    #[test]
    fn front_end_effects_are_returned() {
        let (runner, _store, _rx) = runner();
        let notify = Effect::Notify {
            severity: Severity::Error,
            message: "Please enter a video URL".into(),
        };
        let rest = runner.run(vec![notify.clone(), Effect::ScrollToTop]);
        assert_eq!(rest, vec![notify, Effect::ScrollToTop]);
    }
}
