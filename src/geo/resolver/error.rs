use std::fmt::Formatter;

#[derive(Debug)]
pub enum TransportCause {
    /// Connection, timeout or body read failure
    Request(reqwest::Error),
    /// Non-2xx response, the body is not read
    Status(u16),
    /// Body is not the expected JSON document
    Payload(serde_json::Error)
}

#[derive(Debug)]
pub enum ResolutionError {
    Transport(TransportCause)
}

impl ResolutionError {
    pub fn status(code: u16) -> Self {
        ResolutionError::Transport(TransportCause::Status(code))
    }
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let msg = match self {
            ResolutionError::Transport(TransportCause::Request(inner)) => {
                format!("request failed: {}", inner)
            },
            ResolutionError::Transport(TransportCause::Status(code)) => {
                format!("unexpected status {}", code)
            },
            ResolutionError::Transport(TransportCause::Payload(inner)) => {
                format!("invalid payload: {}", inner)
            },
        };
        write!(f, "Resolution error: {}", msg)
    }
}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolutionError::Transport(TransportCause::Request(inner)) => Some(inner),
            ResolutionError::Transport(TransportCause::Payload(inner)) => Some(inner),
            ResolutionError::Transport(TransportCause::Status(_)) => None,
        }
    }
}

impl From<reqwest::Error> for ResolutionError {
    fn from(error: reqwest::Error) -> Self {
        ResolutionError::Transport(TransportCause::Request(error))
    }
}

impl From<serde_json::Error> for ResolutionError {
    fn from(error: serde_json::Error) -> Self {
        ResolutionError::Transport(TransportCause::Payload(error))
    }
}
