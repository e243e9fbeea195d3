use thiserror::Error;

/// Rejected client input. Always recoverable and reported as HTTP 400.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("No JSON data provided")] NotAnObject,
    #[error("Missing required field: {0}")] MissingField(&'static str),
    #[error("Invalid number format: {0}")] InvalidNumber(&'static str),
    /// Non-numeric planning parameter.
    #[error("Invalid numeric inputs: {0}")] InvalidNumericInput(&'static str),
    #[error("{message}")] OutOfRange { field: &'static str, message: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::MissingField(f)
            | ValidationError::InvalidNumber(f)
            | ValidationError::InvalidNumericInput(f) => Some(f),
            ValidationError::OutOfRange { field, .. } => Some(field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Auth,
    RateLimited,
    /// Non-success status reported by the backend.
    Backend { status: u16 },
    MissingCredentials,
    EmptyCompletion,
}

impl FailureKind {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(self) -> bool {
        match self {
            FailureKind::Network | FailureKind::RateLimited => true,
            FailureKind::Backend { status } => status >= 500,
            FailureKind::Auth | FailureKind::MissingCredentials | FailureKind::EmptyCompletion => false,
        }
    }
}

/// Any failure of the generative backend, carrying the upstream message.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct GenerationFailed {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationFailed {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn from_status(provider: &str, status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => FailureKind::Auth,
            429 => FailureKind::RateLimited,
            s => FailureKind::Backend { status: s },
        };
        Self::new(kind, format!("{provider} API error ({status}): {body}"))
    }

    pub fn network(provider: &str, err: reqwest::Error) -> Self {
        Self::new(FailureKind::Network, format!("{provider} request failed: {err}"))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("model output is not valid JSON: {0}")] MalformedOutput(String),
    #[error("plan violates schema at `{field}`: {reason}")] SchemaViolation { field: String, reason: String },
}

/// Failure talking to the near-earth-object data provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("NEO request failed: {0}")] Request(#[from] reqwest::Error),
    #[error("invalid NEO base URL: {0}")] InvalidUrl(String),
    #[error("NEO response was not JSON (status {status}): {message}")] NotJson { status: u16, message: String },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)] Validation(#[from] ValidationError),
    #[error("AI call failed: {0}")] Generation(#[from] GenerationFailed),
    #[error("AI call failed: {0}")] Plan(#[from] PlanError),
}
