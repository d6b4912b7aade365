use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_HINT: &str = "Presser would exit now. Run presser --help for command line options";

#[derive(Error, Debug)]
pub enum PresserError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read post '{path}': {source}")]
    PostReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Could not reach XML-RPC endpoint {endpoint}: {reason}")]
    ConnectionError { endpoint: String, reason: String },

    #[error("Invalid credentials: {message}")]
    InvalidCredentialsError { message: String },

    #[error("Remote fault {code}: {message}")]
    RemoteFaultError { code: i64, message: String },

    #[error("Malformed XML-RPC payload: {message}")]
    XmlRpcError { message: String },

    #[error("Configuration file {path} could not be used: {message}")]
    ConfigFileError { path: PathBuf, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Prompt failed: {message}")]
    PromptError { message: String },

    #[error("No posts to post")]
    NoPostsError,
}

impl PresserError {
    /// Connection and credential problems end the batch no matter which
    /// failure policy is active.
    pub fn is_batch_fatal(&self) -> bool {
        !matches!(
            self,
            PresserError::PostReadError { .. } | PresserError::RemoteFaultError { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        1
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PresserError::ConnectionError { .. } | PresserError::HttpError(_) => {
                "Either an invalid WordPress site address or your site doesn't have the XML-RPC protocol turned on.".to_string()
            }
            PresserError::InvalidCredentialsError { message } => {
                format!("WordPress rejected the credentials: {}", message)
            }
            PresserError::PostReadError { path, source } => {
                format!("Could not read post file {}: {}", path.display(), source)
            }
            PresserError::NoPostsError => "No posts to post".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PresserError::ConnectionError { .. } | PresserError::HttpError(_) => {
                "Check the site address and make sure XML-RPC is enabled on the site".to_string()
            }
            PresserError::InvalidCredentialsError { .. } => {
                "Check the username and password in your .ini file or pass --username".to_string()
            }
            PresserError::PostReadError { .. } => {
                "Make sure the file exists and is UTF-8 text, or use --on-error skip".to_string()
            }
            PresserError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of {} and try again", field)
            }
            _ => EXIT_HINT.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PresserError>;
