// src/error.rs
use thiserror::Error;

/// Everything that can go wrong between reading the location and putting a
/// page image on screen.
///
/// Cloneable so one in-flight image load can hand the same outcome to every
/// caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    #[error("not a chapter page: {0}")]
    UnsupportedLocation(String),

    #[error("missing `{0}` in location")]
    MissingParameter(&'static str),

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected payload from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl ReaderError {
    pub fn network(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ReaderError::Status {
            url: "http://example.com/a.jpg".to_string(),
            status: 403,
        };
        assert_eq!(
            err.to_string(),
            "request to http://example.com/a.jpg returned HTTP 403"
        );
        assert_eq!(
            ReaderError::MissingParameter("cid").to_string(),
            "missing `cid` in location"
        );
    }
}
