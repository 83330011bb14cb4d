//! Sentiment engine: HTTP client for the classification collaborator.
mod classifier;
mod engine;
mod types;
mod wire;

pub use classifier::{Classifier, ClassifierSettings, ReqwestClassifier, DEFAULT_ENDPOINT};
pub use engine::{EngineCommands, EngineEvents, EngineHandle, EngineStartError};
pub use types::{
    Classification, ClassifyError, EngineEvent, FailureKind, HealthReport, RequestId,
};
