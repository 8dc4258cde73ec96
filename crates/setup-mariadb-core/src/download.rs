use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::ProvisionError;

const INSTALLER_TIMEOUT: Duration = Duration::from_secs(600);
const INSTALLER_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const INSTALLER_RETRY_DELAYS_SECS: [u64; 3] = [0, 2, 5];

/// Download an installer package to `path`, retrying transient failures.
///
/// # Errors
/// Returns an error if the client cannot be built, every attempt fails, or
/// the file cannot be written.
pub async fn download_installer(url: &str, path: &Path) -> Result<(), ProvisionError> {
    let delays = INSTALLER_RETRY_DELAYS_SECS.map(Duration::from_secs);
    download_installer_with(url, path, &delays).await
}

/// One attempt per entry of `delays`, each preceded by its delay. Write
/// failures are not retried.
async fn download_installer_with(
    url: &str,
    path: &Path,
    delays: &[Duration],
) -> Result<(), ProvisionError> {
    let client = reqwest::Client::builder()
        .timeout(INSTALLER_TIMEOUT)
        .connect_timeout(INSTALLER_CONNECT_TIMEOUT)
        .user_agent(format!("setup-mariadb/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ProvisionError::DownloadClient)?;

    let mut last_error = None;

    for delay in delays {
        if !delay.is_zero() {
            tokio::time::sleep(*delay).await;
        }

        match download_once(&client, url, path).await {
            Ok(()) => return Ok(()),
            Err(error @ ProvisionError::DownloadWrite { .. }) => return Err(error),
            Err(error) => {
                log::warn!("{error}");
                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ProvisionError::DownloadStatus {
        url: url.to_string(),
        status: reqwest::StatusCode::REQUEST_TIMEOUT,
    }))
}

async fn download_once(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
) -> Result<(), ProvisionError> {
    let request_error = |source| ProvisionError::DownloadRequest {
        url: url.to_string(),
        source,
    };
    let write_error = |source| ProvisionError::DownloadWrite {
        path: path.display().to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(request_error)?;

    if !response.status().is_success() {
        return Err(ProvisionError::DownloadStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let mut file = tokio::fs::File::create(path).await.map_err(write_error)?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(request_error)?;
        file.write_all(&chunk).await.map_err(write_error)?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(write_error)?;
    log::debug!("Downloaded {written} bytes to {}", path.display());

    Ok(())
}
