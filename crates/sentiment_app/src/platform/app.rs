use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use engine_logging::{engine_debug, engine_info, engine_warn};
use sentiment_core::{update, AppState, ClassifyOutcome, Msg};
use sentiment_engine::{EngineEvent, EngineHandle};

use super::effects::EffectRunner;
use super::terminal::TerminalPresenter;
use crate::cli::Cli;
use crate::config::{AppConfig, ConfigError, ConfigSource};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID_CONFIG: u8 = 2;

/// Everything the session loop reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    Msg(Msg),
    /// No more user input will arrive; finish any pending request and stop.
    InputClosed,
}

/// How the most recent submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    EmptyInput,
    Classified,
    Rejected,
    TransportFailed,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub submissions: usize,
    pub last: Option<Outcome>,
}

impl SessionSummary {
    fn observe(&mut self, before: &AppState, msg: &Msg) {
        match msg {
            Msg::SubmitClicked if !before.is_pending() => {
                self.submissions += 1;
                if before.input().trim().is_empty() {
                    self.last = Some(Outcome::EmptyInput);
                }
            }
            Msg::ClassifyCompleted {
                request_id,
                outcome,
            } if before.pending() == Some(*request_id) => {
                self.last = Some(match outcome {
                    ClassifyOutcome::Classified { .. } => Outcome::Classified,
                    ClassifyOutcome::Rejected { .. } => Outcome::Rejected,
                    ClassifyOutcome::TransportFailed => Outcome::TransportFailed,
                });
            }
            _ => {}
        }
    }
}

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let (mut config, source) = AppConfig::load(&cli.config)?;
    config.apply_cli(&cli);
    config.validate()?;

    engine_logging::initialize(config.log_destination(), config.log_level()?);
    match &source {
        ConfigSource::File(path) => engine_info!("Loaded configuration from {:?}", path),
        ConfigSource::Defaults => engine_info!("No configuration file; using defaults"),
    }

    let engine = EngineHandle::new(config.classifier_settings())
        .context("failed to start classification engine")?;

    if cli.health {
        // Leave headroom beyond the client timeout so the engine reports first.
        let wait = config.request_timeout() + Duration::from_secs(1);
        let ready = check_health(&engine, wait, &mut io::stdout())?;
        return Ok(ExitCode::from(health_exit_code(ready)));
    }

    let (loop_tx, loop_rx) = mpsc::channel();
    let interactive = cli.tweet.is_none();
    match cli.tweet {
        Some(tweet) => {
            for event in [
                LoopEvent::Msg(Msg::InputChanged(tweet)),
                LoopEvent::Msg(Msg::SubmitClicked),
                LoopEvent::InputClosed,
            ] {
                let _ = loop_tx.send(event);
            }
        }
        None => spawn_stdin_reader(loop_tx.clone()),
    }

    let runner = EffectRunner::new(engine, loop_tx);
    let mut presenter = TerminalPresenter::new(io::stdout(), interactive);
    let summary = drive(&runner, &loop_rx, &mut presenter)?;
    engine_info!(
        "Session finished after {} submission(s), last outcome {:?}",
        summary.submissions,
        summary.last
    );

    Ok(ExitCode::from(session_exit_code(interactive, &summary)))
}

/// Interactive sessions always succeed; a one-shot run succeeds only when its
/// tweet was classified.
fn session_exit_code(interactive: bool, summary: &SessionSummary) -> u8 {
    if interactive || summary.last == Some(Outcome::Classified) {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

fn health_exit_code(ready: bool) -> u8 {
    if ready {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}

/// Status for a run that ended in an error. Only a rejected configuration
/// gets its own code.
pub fn error_exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ConfigError>().is_some() {
        EXIT_INVALID_CONFIG
    } else {
        EXIT_FAILURE
    }
}

/// Runs the update loop until input is closed and no request is pending.
pub fn drive<W: Write>(
    runner: &EffectRunner,
    events: &mpsc::Receiver<LoopEvent>,
    presenter: &mut TerminalPresenter<W>,
) -> io::Result<SessionSummary> {
    let mut state = AppState::new();
    let mut summary = SessionSummary::default();
    let mut input_closed = false;

    presenter.prompt()?;
    while let Ok(event) = events.recv() {
        match event {
            LoopEvent::InputClosed => {
                engine_debug!("Input closed");
                input_closed = true;
            }
            LoopEvent::Msg(msg) => {
                let submitting = matches!(msg, Msg::SubmitClicked);
                summary.observe(&state, &msg);
                let (next, effects) = update(state, msg);
                state = next;
                let had_effects = !effects.is_empty();
                runner.run(effects, presenter)?;
                if (had_effects || submitting) && !state.is_pending() && !input_closed {
                    presenter.prompt()?;
                }
            }
        }
        if input_closed && !state.is_pending() {
            break;
        }
    }

    Ok(summary)
}

fn spawn_stdin_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || read_input(io::stdin().lock(), &loop_tx));
}

/// Submits every line of `reader`, then reports the input closed. Bytes that
/// are not UTF-8 are replaced rather than ending the session.
fn read_input<R: BufRead>(mut reader: R, loop_tx: &mpsc::Sender<LoopEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                engine_warn!("Failed to read input: {}", err);
                break;
            }
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            engine_warn!("Input line was not valid UTF-8; invalid bytes replaced");
        }
        let sent = loop_tx
            .send(LoopEvent::Msg(Msg::InputChanged(line.into_owned())))
            .and_then(|()| loop_tx.send(LoopEvent::Msg(Msg::SubmitClicked)));
        if sent.is_err() {
            return;
        }
    }
    let _ = loop_tx.send(LoopEvent::InputClosed);
}

/// Prints the collaborator's health report; returns whether it is ready to
/// classify.
fn check_health<W: Write>(
    engine: &EngineHandle,
    wait: Duration,
    out: &mut W,
) -> io::Result<bool> {
    engine.check_health();
    let report = match engine.recv_timeout(wait) {
        Some(EngineEvent::HealthCompleted(result)) => result,
        Some(other) => {
            engine_warn!("Unexpected engine event during health check: {:?}", other);
            writeln!(out, "unreachable: no health report")?;
            return Ok(false);
        }
        None => {
            engine_warn!("Health check did not finish within {:?}", wait);
            writeln!(out, "unreachable: no answer within {wait:?}")?;
            return Ok(false);
        }
    };

    match report {
        Ok(report) => {
            writeln!(
                out,
                "status: {}\nmodel loaded: {}\nvectorizer loaded: {}\nmodels loaded: {}",
                report.status,
                report.model_loaded,
                report.vectorizer_loaded,
                report.models_loaded
            )?;
            Ok(report.is_ready())
        }
        Err(err) => {
            engine_warn!("Health check failed: {}", err);
            writeln!(out, "unreachable: {err}")?;
            Ok(false)
        }
    }
}
