use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;

use engine_logging::{engine_debug, engine_info, engine_warn};
use sentiment_core::{ClassifyOutcome, Effect, Msg, Presenter, RequestId};
use sentiment_engine::{
    Classification, ClassifyError, EngineCommands, EngineEvent, EngineEvents, EngineHandle,
    FailureKind,
};

use super::app::LoopEvent;
use super::terminal::TerminalPresenter;

pub struct EffectRunner {
    engine: EngineCommands,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, loop_tx: mpsc::Sender<LoopEvent>) -> Self {
        let (engine, events) = engine.split();
        spawn_event_loop(events, loop_tx);
        Self { engine }
    }

    /// Executes effects in order: display commands go to the presenter, which
    /// is rendered once at the end; classify requests go to the engine.
    pub fn run<W: Write>(
        &self,
        effects: Vec<Effect>,
        presenter: &mut TerminalPresenter<W>,
    ) -> io::Result<()> {
        for effect in effects {
            match effect {
                Effect::Display(command) => presenter.apply(&command),
                Effect::Classify { request_id, tweet } => {
                    engine_debug!(
                        "Dispatching request_id={} tweet_len={}",
                        request_id,
                        tweet.len()
                    );
                    self.engine.classify(request_id, tweet);
                }
            }
        }
        presenter.render()
    }
}

/// Forwards engine completions into the session loop until either side hangs
/// up.
fn spawn_event_loop(events: EngineEvents, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let msg = match event {
                EngineEvent::ClassifyCompleted { request_id, result } => Msg::ClassifyCompleted {
                    request_id,
                    outcome: to_outcome(request_id, result),
                },
                EngineEvent::HealthCompleted(result) => {
                    engine_info!("Health check finished: {:?}", result);
                    continue;
                }
            };
            if loop_tx.send(LoopEvent::Msg(msg)).is_err() {
                break;
            }
        }
        engine_debug!("Engine event forwarding stopped");
    });
}

pub(crate) fn to_outcome(
    request_id: RequestId,
    result: Result<Classification, ClassifyError>,
) -> ClassifyOutcome {
    match result {
        Ok(classification) => ClassifyOutcome::Classified {
            sentiment: classification.sentiment,
            emoji: classification.emoji,
        },
        Err(ClassifyError {
            kind: FailureKind::Rejected { status, error },
            ..
        }) => {
            engine_info!("Request {} rejected with status {}", request_id, status);
            ClassifyOutcome::Rejected { error }
        }
        Err(err) => {
            engine_warn!("Request {} failed: {}", request_id, err);
            ClassifyOutcome::TransportFailed
        }
    }
}
