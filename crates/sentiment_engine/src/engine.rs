use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};

use crate::classifier::{ClassifierSettings, Classifier, ReqwestClassifier};
use crate::{ClassifyError, EngineEvent, RequestId};

enum EngineCommand {
    Classify { request_id: RequestId, tweet: String },
    Health,
}

/// Runs classifier calls on a background tokio runtime and reports back over
/// a channel, so the caller's event loop never blocks on the network.
///
/// The engine thread stops once every [`EngineCommands`] is dropped; the
/// event side then drains and [`EngineEvents::recv`] returns `None`.
pub struct EngineHandle {
    commands: EngineCommands,
    events: EngineEvents,
}

/// Sending half of an [`EngineHandle`].
#[derive(Clone)]
pub struct EngineCommands {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving half of an [`EngineHandle`].
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClassifierSettings) -> Result<Self, EngineStartError> {
        engine_info!("Engine targeting {}", settings.endpoint);
        let classifier = ReqwestClassifier::new(settings)?;
        Self::with_classifier(Arc::new(classifier))
    }

    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Result<Self, EngineStartError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let classifier = classifier.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(classifier.as_ref(), command, event_tx).await;
                });
            }
            engine_debug!("Engine command channel closed");
        });

        Ok(Self {
            commands: EngineCommands { cmd_tx },
            events: EngineEvents { event_rx },
        })
    }

    pub fn classify(&self, request_id: RequestId, tweet: impl Into<String>) {
        self.commands.classify(request_id, tweet);
    }

    pub fn check_health(&self) {
        self.commands.check_health();
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.events.recv_timeout(timeout)
    }

    /// Separates the halves so events can be consumed on another thread.
    pub fn split(self) -> (EngineCommands, EngineEvents) {
        (self.commands, self.events)
    }
}

impl EngineCommands {
    pub fn classify(&self, request_id: RequestId, tweet: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Classify {
            request_id,
            tweet: tweet.into(),
        });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Health);
    }
}

impl EngineEvents {
    /// Blocks for the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineStartError {
    #[error("failed to build http client: {0}")]
    Client(#[from] ClassifyError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

async fn handle_command(
    classifier: &dyn Classifier,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Classify { request_id, tweet } => {
            let result = classifier.classify(&tweet).await;
            EngineEvent::ClassifyCompleted { request_id, result }
        }
        EngineCommand::Health => EngineEvent::HealthCompleted(classifier.health().await),
    };
    let _ = event_tx.send(event);
}
