//! File download

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use url::Url;

use super::client::{transport_message, ApiClient};
use super::codes::ErrorCode;
use super::error::{ApiCallError, ApiResult};
use super::hooks::ClientHooks;

const DOWNLOAD_CHUNK_SIZE: usize = 1024;

impl<E: ErrorCode, H: ClientHooks> ApiClient<E, H> {
    /// Download `source_url` into `local_dir`, naming the file after the
    /// last path segment of the URL. Returns the path written.
    ///
    /// The local file is created before the request is made and is not
    /// removed if the download fails.
    pub fn download_file(
        &self,
        source_url: &str,
        local_dir: impl AsRef<Path>,
    ) -> ApiResult<PathBuf, E> {
        let file_name = file_name_from_url(source_url).ok_or_else(|| {
            ApiCallError::<E>::with_message("Download URL has no file name", Some(source_url))
        })?;
        let local_path = local_dir.as_ref().join(file_name);

        let mut file = File::create(&local_path).map_err(|e| {
            ApiCallError::<E>::transport("Failed to create download file", Some(source_url), e)
        })?;

        tracing::debug!("Downloading {} to {}", source_url, local_path.display());

        let mut response = self
            .http_client()
            .get(source_url)
            .headers(self.hooks().headers(&HashMap::new()))
            .send()
            .map_err(|e| ApiCallError::<E>::transport(transport_message(&e), Some(source_url), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiCallError::status(status.as_u16(), source_url));
        }

        let mut chunk = [0u8; DOWNLOAD_CHUNK_SIZE];
        loop {
            let read = response.read(&mut chunk).map_err(|e| {
                ApiCallError::<E>::transport("Failed to read download body", Some(source_url), e)
            })?;
            if read == 0 {
                break;
            }
            file.write_all(&chunk[..read]).map_err(|e| {
                ApiCallError::<E>::transport("Failed to write download file", Some(source_url), e)
            })?;
        }

        Ok(local_path)
    }
}

fn file_name_from_url(source_url: &str) -> Option<String> {
    let url = Url::parse(source_url).ok()?;
    let name = url.path_segments()?.last()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_last_path_segment() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/images/cat.png"),
            Some("cat.png".to_string())
        );
        assert_eq!(
            file_name_from_url("https://cdn.example.com/a/report.csv?sig=abc"),
            Some("report.csv".to_string())
        );
    }

    #[test]
    fn test_urls_without_file_name_are_rejected() {
        assert_eq!(file_name_from_url("https://cdn.example.com/images/"), None);
        assert_eq!(file_name_from_url("https://cdn.example.com"), None);
        assert_eq!(file_name_from_url("not a url"), None);
    }
}
