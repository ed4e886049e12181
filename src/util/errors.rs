#[derive(Debug)]
pub enum StatusError {
    /// The ping itself failed: connect error, timeout, protocol error.
    Ping(mcping::Error),
    /// The server answered but the response is missing required fields.
    MalformedResponse(String),
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusError::Ping(err) => write!(f, "Status query failed: {}", err),
            StatusError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for StatusError {}

impl From<mcping::Error> for StatusError {
    fn from(err: mcping::Error) -> Self {
        StatusError::Ping(err)
    }
}
