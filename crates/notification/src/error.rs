use lettre::transport::smtp;

/// Failure reported by a mail transport, with the diagnostic fields exposed
/// to callers outside production.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub code: Option<String>,
    pub response: Option<String>,
    pub response_code: Option<u16>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }
}

impl From<smtp::Error> for TransportError {
    fn from(err: smtp::Error) -> Self {
        let response_code = err
            .status()
            .and_then(|status| status.to_string().parse::<u16>().ok());

        let code = if err.is_timeout() {
            "ETIMEDOUT"
        } else if matches!(response_code, Some(530 | 534 | 535)) {
            "EAUTH"
        } else if err.is_permanent() || err.is_transient() || err.is_response() {
            "EPROTOCOL"
        } else if err.is_client() {
            "ECLIENT"
        } else {
            "ECONNECTION"
        };

        let message = err.to_string();
        let response = response_code.map(|_| message.clone());

        Self {
            message,
            code: Some(code.to_owned()),
            response,
            response_code,
        }
    }
}

impl From<lettre::error::Error> for TransportError {
    fn from(err: lettre::error::Error) -> Self {
        Self::new(err.to_string()).with_code("EMESSAGE")
    }
}

impl From<lettre::address::AddressError> for TransportError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::new(format!("invalid address: {err}")).with_code("EENVELOPE")
    }
}

impl From<askama::Error> for TransportError {
    fn from(err: askama::Error) -> Self {
        Self::new(format!("failed to render email: {err}")).with_code("ETEMPLATE")
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            "ETIMEDOUT"
        } else if err.is_connect() {
            "ECONNECTION"
        } else {
            "EPROVISION"
        };

        Self {
            message: err.to_string(),
            code: Some(code.to_owned()),
            response: None,
            response_code: err.status().map(|status| status.as_u16()),
        }
    }
}
