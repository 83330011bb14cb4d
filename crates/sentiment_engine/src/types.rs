use std::fmt;

pub type RequestId = u64;

/// A successful classification as returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub sentiment: String,
    pub emoji: String,
    /// Preprocessed text the backend actually scored, when it reports one.
    pub processed: Option<String>,
}

/// Readiness report from the collaborator's `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
    pub models_loaded: bool,
}

impl HealthReport {
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.models_loaded
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ClassifyCompleted {
        request_id: RequestId,
        result: Result<Classification, ClassifyError>,
    },
    HealthCompleted(Result<HealthReport, ClassifyError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClassifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClassifyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True when no well-formed response was obtained. Everything except an
    /// application-level rejection counts.
    pub fn is_transport(&self) -> bool {
        !matches!(self.kind, FailureKind::Rejected { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    /// Non-success status carrying a well-formed `{"error": ...}` body.
    Rejected { status: u16, error: String },
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedBody { status: u16 },
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Rejected { status, error } => {
                write!(f, "rejected with status {status}: {error}")
            }
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedBody { status } => {
                write!(f, "malformed response body (status {status})")
            }
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
        }
    }
}
