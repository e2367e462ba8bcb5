use thiserror::Error;

/// Centralized error types for the re-timestamping pipeline
///
/// Validation failures (`NoSelection`, `MultipleRecordings`, `Parse`) abort a run before
/// any update is dispatched. `UpdateDispatch` is local to a single chunk and never stops
/// the remaining sequence.
///
/// # Example
///
/// ```no_run
/// use retimecore::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// No media was selected
    #[error("No medias were selected")]
    NoSelection,

    /// Chunks from more than one recording were selected
    #[error("Multiple recordings were selected (group {expected} and group {found})")]
    MultipleRecordings { expected: u32, found: u32 },

    /// Malformed filename, duration or timestamp text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A single media update failed (network, auth, non-2xx status)
    #[error("Failed to update media {media_id}: {reason}")]
    UpdateDispatch { media_id: String, reason: String },

    /// No bearer token was supplied or found
    #[error("Could not find access token")]
    MissingToken,

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration loading errors
    #[error("Config error: {0}")]
    Config(String),

    /// HTTP/transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

/// Text that could not be parsed into one of the media model types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid chunk filename '{0}' (expected e.g. GX020005.MP4)")]
    InvalidFilename(String),

    #[error("invalid clip duration '{0}' (expected minutes:seconds)")]
    InvalidDuration(String),

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// A selected library item lacks one of the elements a chunk is read from
    #[error("selected item {item} has no {field}")]
    MissingField { item: String, field: &'static str },
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl AppError {
    /// True for the errors that abort a run before anything is dispatched.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AppError::NoSelection | AppError::MultipleRecordings { .. } | AppError::Parse(_) | AppError::MissingToken
        )
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
