use reqwest::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach the server: {0}")]
    Network(String),
    #[error("The server took too long to respond")]
    Timeout,
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
    #[error("Could not build request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Server { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Rejected before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("WhatsApp number must start with + and the country code, followed by 8 to 15 digits")]
    InvalidWhatsappNumber,
    #[error("Scan interval must be one of the offered values, got {0} minutes")]
    InvalidInterval(u32),
    #[error("Reply text cannot be empty")]
    EmptyReply,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ActionError::Api(err) if err.is_unauthorized())
    }
}
