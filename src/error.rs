use reqwest::StatusCode;

/// Failure of one of the two HTTP calls in a relay cycle.
#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    /// The peer answered with a non-success status.
    #[error("{status} - {body}")]
    Status { status: StatusCode, body: String },
    /// Connection, protocol or decoding failure. The request URL is stripped
    /// because the destination URL embeds the access token.
    #[error(transparent)]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Transport(e.without_url())
    }
}

impl RelayError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RelayError::Status { status, .. } => Some(*status),
            RelayError::Transport(e) => e.status(),
        }
    }

    /// Turns a non-success response into `RelayError::Status`, keeping its body.
    pub async fn check(resp: reqwest::Response) -> Result<reqwest::Response, RelayError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(
                    status = status.as_u16(),
                    error = %e.without_url(),
                    "failed to read error body"
                );
                String::new()
            }
        };
        Err(RelayError::Status { status, body })
    }
}
