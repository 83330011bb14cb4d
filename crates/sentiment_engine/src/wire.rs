//! JSON bodies exchanged with the classification collaborator.

use serde::{Deserialize, Serialize};

use crate::{Classification, HealthReport};

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyRequest<'a> {
    pub tweet: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifySuccess {
    sentiment: String,
    emoji: String,
    #[serde(default)]
    processed: Option<String>,
}

impl From<ClassifySuccess> for Classification {
    fn from(body: ClassifySuccess) -> Self {
        Classification {
            sentiment: body.sentiment,
            emoji: body.emoji,
            processed: body.processed,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassifyFailure {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthBody {
    status: String,
    #[serde(default)]
    model_loaded: bool,
    #[serde(default)]
    vectorizer_loaded: bool,
    #[serde(default)]
    models_loaded: bool,
}

impl From<HealthBody> for HealthReport {
    fn from(body: HealthBody) -> Self {
        HealthReport {
            status: body.status,
            model_loaded: body.model_loaded,
            vectorizer_loaded: body.vectorizer_loaded,
            models_loaded: body.models_loaded,
        }
    }
}
