use reqwest::StatusCode;
use thiserror::Error;

/// A remote resource could not be retrieved.
///
/// Raised for the languages manifest, a file index, or any content file.
/// Always carries the URL that failed so the calling layer can log something
/// actionable before translating this into its own failure response.
/// The aggregation performs no retries and returns no partial results.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport failed: connection error, timeout, or an unreadable body.
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("fetch of {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

impl FetchError {
    /// The URL whose fetch failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } => url,
            FetchError::Status { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_contains_url_and_status() {
        let err = FetchError::Status {
            url: "https://repo.example.com/en/index".to_string(),
            status: StatusCode::NOT_FOUND,
        };

        let msg = err.to_string();
        assert!(msg.contains("https://repo.example.com/en/index"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn test_url_accessor() {
        let err = FetchError::Status {
            url: "https://repo.example.com/languages".to_string(),
            status: StatusCode::BAD_GATEWAY,
        };

        assert_eq!(err.url(), "https://repo.example.com/languages");
    }
}
