use tracing::{info, instrument};

use crate::error::GenerationError;

/// Fetches a generated image with a single GET. Transport errors and non-2xx statuses are
/// [`GenerationError::Download`].
#[instrument(skip(http))]
pub async fn download_image(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, GenerationError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| GenerationError::Download(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GenerationError::Download(format!("{} returned {}", url, status)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| GenerationError::Download(e.to_string()))?;
    info!(bytes = bytes.len(), "Image downloaded");
    Ok(bytes.to_vec())
}
