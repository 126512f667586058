use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the user resource.
#[derive(Debug, Error)]
pub enum Error {
    #[error("user name must not be empty")]
    EmptyName,
    #[error("invalid user name: {name:?}")]
    InvalidName { name: String },
    #[error("user {name} does not exist")]
    UserNotFound { name: String },
    #[error("user {name} already exists")]
    UserAlreadyExists { name: String },
    #[error("artifactory request failed: {0}")]
    Artifactory(#[from] TransportError),
    #[error("unexpected {entity} payload: {source}")]
    Schema {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn schema(entity: &'static str, source: serde_json::Error) -> Self {
        Self::Schema { entity, source }
    }

    /// HTTP status reported by Artifactory, if the failure came from a response.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Artifactory(err) => err.status(),
            _ => None,
        }
    }
}

/// Errors raised while talking to Artifactory over HTTP.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{url} - {status}, {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid artifactory url: {0}")]
    InvalidUrl(String),
    #[error("error parsing url: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl TransportError {
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request { source, .. } => source.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_through_resource_error() {
        let err = Error::from(TransportError::Status {
            url: "http://localhost/api/security/users/alice".to_string(),
            status: StatusCode::FORBIDDEN,
            message: "forbidden".to_string(),
        });
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn domain_errors_carry_no_status() {
        let err = Error::UserNotFound {
            name: "alice".to_string(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "user alice does not exist");
    }
}
