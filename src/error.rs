/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the application
#[derive(Debug)]
pub enum Error {
    /// No API key was given on the command line or in `ANTHROPIC_API_KEY`
    MissingApiKey,
    InvalidArgument(String),
    /// The text-generation service could not be reached or the exchange broke off
    Transport(String),
    /// The text-generation service answered with a non-success status
    Api { status: u16, message: String },
    SerializationError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingApiKey => write!(
                f,
                "ANTHROPIC_API_KEY not set. Set it via environment variable or --api-key flag."
            ),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::Transport(msg) => write!(f, "Request to text-generation service failed: {}", msg),
            Error::Api { status, message } => {
                write!(f, "Text-generation service error ({}): {}", status, message)
            }
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
