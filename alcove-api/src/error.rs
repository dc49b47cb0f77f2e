use alcove_core::core_feed::FeedError;
use reqwest::StatusCode;
use thiserror::Error;

/// Client error taxonomy. One propagation convention for every operation:
/// return the typed error, let the caller decide presentation.
///
/// Server-detected variants display the server's message verbatim, per the
/// backend contract.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client-detected invalid input; the request was never sent
    #[error("{0}")]
    Validation(String),

    /// Server rejected the credential or the actor's role (401/403)
    #[error("{0}")]
    Authorization(String),

    /// Duplicate state, e.g. a second pending invitation for the same
    /// invitee or inviting an existing member (409)
    #[error("{0}")]
    Duplicate(String),

    /// Target entity does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Login succeeded but the account has not been approved yet
    #[error("Account is still awaiting approval")]
    AwaitingApproval,

    /// Any other non-2xx response
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport failure; no response available
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Map a non-2xx status and its `{message}` body into a variant
    pub(crate) fn from_response(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 | 403 => ApiError::Authorization(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Duplicate(message),
            status => ApiError::Api { status, message },
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ApiError::from_response(StatusCode::UNAUTHORIZED, "no".into()),
            ApiError::Authorization(_)
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::FORBIDDEN, "no".into()),
            ApiError::Authorization(_)
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::CONFLICT, "dup".into()),
            ApiError::Duplicate(_)
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::NOT_FOUND, "gone".into()),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            ApiError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_message_is_verbatim() {
        let err = ApiError::from_response(StatusCode::FORBIDDEN, "Only admins can invite".into());
        assert_eq!(err.to_string(), "Only admins can invite");

        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "upstream down".into());
        assert_eq!(err.to_string(), "upstream down");
    }

    #[test]
    fn test_validation_from_feed_error() {
        let err: ApiError = FeedError::BlankContent.into();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
