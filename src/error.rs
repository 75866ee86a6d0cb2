use thiserror::Error;

/// Message shown when the service rejects a request without a `detail`.
pub const GENERIC_REMOTE_MESSAGE: &str = "API Error";

/// Errors raised while editing the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field: {name}")]
    UnknownField { name: String },

    #[error("invalid value for {field}: {value:?} (expected one of: {expected})")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: String,
    },
}

/// Errors raised by a prediction submission
#[derive(Debug, Error)]
pub enum PredictError {
    /// Numeric fields whose text could not be read as a number.
    #[error("please enter a valid number for: {}", fields.join(", "))]
    InvalidInput { fields: Vec<&'static str> },

    #[error("could not reach the prediction service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("unreadable response from the prediction service: {0}")]
    Decode(String),

    /// The service answered with a non-success status.
    #[error("{}", detail.as_deref().unwrap_or(GENERIC_REMOTE_MESSAGE))]
    Remote { status: u16, detail: Option<String> },
}

impl PredictError {
    /// Text shown to the user in the blocking notification.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "Something went wrong".to_string()
        } else {
            message
        }
    }
}

/// Errors raised while resolving predictor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing setting: {name}")]
    MissingSetting { name: &'static str },

    #[error("invalid setting {name}: {message}")]
    InvalidSetting { name: &'static str, message: String },

    #[error("failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
