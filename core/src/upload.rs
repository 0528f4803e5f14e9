// core/src/upload.rs

//! The Image Upload Client: one multipart POST per invocation against the
//! remote image host, returning the public URL the host mints.
//!
//! No retries and no local state live here; retry policy, if any, belongs
//! to the caller.

use crate::error::UploadError;
use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument, warn};

/// Raw image content handed to `create`/`update` calls.
///
/// The whole image is held in memory; the host enforces any size limit.
#[derive(Debug, Clone)]
pub struct NewImage {
  pub bytes: Vec<u8>,
  pub filename: String,
}

impl NewImage {
  pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
    Self {
      bytes,
      filename: filename.into(),
    }
  }
}

/// Seam for the remote object-hosting service.
#[async_trait]
pub trait ImageHost: Send + Sync {
  /// Uploads `bytes` under the `filename` hint and returns the stable
  /// public URL of the hosted image.
  async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, UploadError>;
}

/// Production image host client: multipart `{file, upload_preset}` POST,
/// `secure_url` extracted from the JSON response body.
pub struct HttpImageHost {
  client: reqwest::Client,
  endpoint: String,
  upload_preset: String,
}

impl HttpImageHost {
  pub fn new(endpoint: impl Into<String>, upload_preset: impl Into<String>) -> Self {
    Self {
      client: reqwest::Client::new(),
      endpoint: endpoint.into(),
      upload_preset: upload_preset.into(),
    }
  }
}

/// Pulls `secure_url` out of the host's response body. The response is
/// schema-light JSON; anything that does not parse to an object with a
/// string `secure_url` counts as missing.
fn extract_secure_url(body: &str) -> Option<String> {
  serde_json::from_str::<serde_json::Value>(body)
    .ok()?
    .get("secure_url")?
    .as_str()
    .map(str::to_owned)
}

#[async_trait]
impl ImageHost for HttpImageHost {
  #[instrument(name = "image_host::upload", skip(self, bytes), fields(size = bytes.len()), err(Display))]
  async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, UploadError> {
    if bytes.is_empty() {
      warn!("Upload rejected: image content is empty.");
      return Err(UploadError::ReadFailed);
    }

    let file_part = Part::bytes(bytes.to_vec())
      .file_name(filename.to_string())
      .mime_str("image/*")
      .map_err(|mime_err| UploadError::RequestFailed {
        source: anyhow!(mime_err),
      })?;
    let form = Form::new()
      .part("file", file_part)
      .text("upload_preset", self.upload_preset.clone());

    let response = self
      .client
      .post(&self.endpoint)
      .multipart(form)
      .send()
      .await
      .map_err(|transport_err| UploadError::RequestFailed {
        source: anyhow!(transport_err),
      })?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      warn!(%status, "Image host rejected the upload: {}", body);
      return Err(UploadError::RequestFailed {
        source: anyhow!("image host returned {status}: {body}"),
      });
    }

    let body = response
      .text()
      .await
      .map_err(|transport_err| UploadError::RequestFailed {
        source: anyhow!(transport_err),
      })?;
    match extract_secure_url(&body) {
      Some(url) => {
        debug!(%url, "Image hosted.");
        Ok(url)
      }
      None => {
        warn!("Image host answered with a success status but no secure_url.");
        Err(UploadError::UrlMissing)
      }
    }
  }
}
