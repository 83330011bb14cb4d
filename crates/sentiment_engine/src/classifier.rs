use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode, Url};

use crate::wire::{ClassifyFailure, ClassifyRequest, ClassifySuccess, HealthBody};
use crate::{Classification, ClassifyError, FailureKind, HealthReport};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    /// Base URL of the collaborator; `/classify` and `/health` hang off it.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 64 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, tweet: &str) -> Result<Classification, ClassifyError>;

    async fn health(&self) -> Result<HealthReport, ClassifyError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClassifier {
    settings: ClassifierSettings,
    client: reqwest::Client,
}

impl ReqwestClassifier {
    pub fn new(settings: ClassifierSettings) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClassifyError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint_url(&self, route: &str) -> Result<Url, ClassifyError> {
        let mut url = Url::parse(&self.settings.endpoint)
            .map_err(|err| ClassifyError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| {
                ClassifyError::new(FailureKind::InvalidEndpoint, "endpoint cannot be a base")
            })?
            .pop_if_empty()
            .push(route);
        Ok(url)
    }

    /// Reads the whole body, refusing anything beyond `max_bytes`.
    async fn read_body(&self, response: Response) -> Result<Vec<u8>, ClassifyError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClassifyError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClassifyError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Classifier for ReqwestClassifier {
    async fn classify(&self, tweet: &str) -> Result<Classification, ClassifyError> {
        let url = self.endpoint_url("classify")?;
        let body = serde_json::to_vec(&ClassifyRequest { tweet })
            .map_err(|err| ClassifyError::new(FailureKind::Network, err.to_string()))?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;

        if status.is_success() {
            let body: ClassifySuccess = parse_body(status, &bytes)?;
            let classification = Classification::from(body);
            if let Some(processed) = classification.processed.as_deref() {
                engine_debug!("Collaborator scored processed text {:?}", processed);
            }
            Ok(classification)
        } else {
            let body: ClassifyFailure = parse_body(status, &bytes)?;
            Err(ClassifyError::new(
                FailureKind::Rejected {
                    status: status.as_u16(),
                    error: body.error,
                },
                status.to_string(),
            ))
        }
    }

    async fn health(&self) -> Result<HealthReport, ClassifyError> {
        let url = self.endpoint_url("health")?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;
        if !status.is_success() {
            return Err(ClassifyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let body: HealthBody = parse_body(status, &bytes)?;
        Ok(HealthReport::from(body))
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
) -> Result<T, ClassifyError> {
    serde_json::from_slice(bytes).map_err(|err| {
        engine_warn!(
            "Undecodable body with status {} ({} bytes): {}",
            status,
            bytes.len(),
            err
        );
        ClassifyError::new(
            FailureKind::MalformedBody {
                status: status.as_u16(),
            },
            err.to_string(),
        )
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ClassifyError {
    if err.is_timeout() {
        return ClassifyError::new(FailureKind::Timeout, err.to_string());
    }
    ClassifyError::new(FailureKind::Network, err.to_string())
}
