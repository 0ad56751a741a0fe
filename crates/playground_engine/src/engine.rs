use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use playground_logging::{pg_debug, pg_warn};

use crate::extract::{ExtractionSettings, RecipeExtractor, ReqwestExtractor};
use crate::{EngineError, EngineEvent, ExtractionJob};

enum EngineCommand {
    Extract(ExtractionJob),
}

/// Sending half of the engine. Cheap to clone.
///
/// Every enqueued job runs as its own task; there is no queueing, limit or
/// ordering between jobs. Completions arrive on the paired [`EngineEvents`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving half of the engine.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ExtractionSettings) -> Result<(Self, EngineEvents), EngineError> {
        let extractor = ReqwestExtractor::new(settings)?;
        Self::with_extractor(Arc::new(extractor))
    }

    pub fn with_extractor(
        extractor: Arc<dyn RecipeExtractor>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("playground-engine")
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let extractor = extractor.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(extractor.as_ref(), command, event_tx).await;
                });
            }
            pg_debug!("engine command channel closed");
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn enqueue(&self, job: ExtractionJob) {
        if self.cmd_tx.send(EngineCommand::Extract(job)).is_err() {
            pg_warn!("engine is gone; dropping extraction job");
        }
    }
}

impl EngineEvents {
    /// Blocks until the next completion. `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    extractor: &dyn RecipeExtractor,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Extract(job) => {
            let result = extractor.extract(&job.url, &job.credential).await;
            if let Err(err) = &result {
                pg_warn!(
                    "extraction failed position_id={} attempt={} kind={}: {}",
                    job.position_id,
                    job.attempt,
                    err.kind,
                    err.message
                );
            }
            let _ = event_tx.send(EngineEvent::ExtractionCompleted {
                position_id: job.position_id,
                attempt: job.attempt,
                result,
            });
        }
    }
}
