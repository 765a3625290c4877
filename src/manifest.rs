use crate::error::FetchError;
use tracing::debug;

/// Fetch a remote resource as raw text.
///
/// One GET, no retries; retry policy belongs to the surrounding system.
/// Transport failures, unreadable bodies and non-success statuses all map to
/// [`FetchError`] carrying the URL that failed.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })
}

/// Fetch a remote text resource and split it into lines.
///
/// Line order is preserved. Both `\n` and `\r\n` terminate a line and the
/// implicit empty line after a trailing terminator is dropped. Interior blank
/// lines are kept: the language manifest is expected to have none, but that
/// is the producer's contract, not this reader's.
///
/// Manifests in this domain hold at most a few hundred entries, so a full
/// read of the body is fine.
pub async fn read_lines(client: &reqwest::Client, url: &str) -> Result<Vec<String>, FetchError> {
    let body = fetch_text(client, url).await?;
    let lines: Vec<String> = body.lines().map(str::to_string).collect();
    debug!(url, count = lines.len(), "read manifest");
    Ok(lines)
}
