use std::error::Error;
use std::fmt;

/// Errors produced by the API layer that commands need to tell apart.
///
/// Transport and decoding failures travel as plain `anyhow::Error`s; this
/// enum covers the cases with distinct user-facing handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A command requires authentication but no token is stored. Raised
    /// before any network call is made.
    NoToken,
    /// The server rejected a previously valid token. The stored token has
    /// already been cleared by the time this error is returned.
    ExpiredToken,
    /// The server rejected the request with an error message.
    Server(String),
    /// The response status was outside the accepted set and carried no
    /// decodable error message.
    UnexpectedStatus(u16),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NoToken => write!(f, "no token available"),
            ApiError::ExpiredToken => write!(f, "expired token"),
            ApiError::Server(msg) => write!(f, "server error: {}", msg),
            ApiError::UnexpectedStatus(code) => write!(f, "unexpected status code: {}", code),
        }
    }
}

impl Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(ApiError::NoToken.to_string(), "no token available");
        assert_eq!(ApiError::ExpiredToken.to_string(), "expired token");
        assert_eq!(
            ApiError::Server("project not found".into()).to_string(),
            "server error: project not found"
        );
        assert_eq!(
            ApiError::UnexpectedStatus(418).to_string(),
            "unexpected status code: 418"
        );
    }

    #[test]
    fn downcasts_through_anyhow() {
        let err = anyhow::Error::from(ApiError::ExpiredToken);
        assert_eq!(
            err.downcast_ref::<ApiError>(),
            Some(&ApiError::ExpiredToken)
        );
    }
}
