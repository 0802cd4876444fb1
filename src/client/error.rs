use async_trait::async_trait;
use reqwest::Response;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api error: {status_code} {message}")]
    Api { status_code: u16, message: String },
    #[error("unable to decode response from {operation}: {message}")]
    Decode { operation: String, message: String },
    #[error("no merchant session: a merchant must be created before {0}")]
    Unauthenticated(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Api {
            status_code: 422,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ClientError::Api {
            status_code: 404,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api { status_code, .. } => Some(*status_code),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ResponseExt {
    async fn map_client_error(self) -> Result<Response, ClientError>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn map_client_error(self) -> Result<Response, ClientError> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        Err(ClientError::Api {
            status_code: status.as_u16(),
            message: self.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ResponseExt for Result<Response, reqwest::Error> {
    async fn map_client_error(self) -> Result<Response, ClientError> {
        match self {
            Ok(response) => response.map_client_error().await,
            Err(e) => Err(ClientError::Transport(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_and_not_found_status_codes() {
        assert_eq!(ClientError::validation("bad").status_code(), Some(422));
        assert_eq!(ClientError::not_found("gone").status_code(), Some(404));
        assert_eq!(
            ClientError::Unauthenticated("categories.create".to_string()).status_code(),
            None
        );
    }
}
