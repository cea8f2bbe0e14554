//! Image host client.
//!
//! Product photos upload to an external image CDN over its signed REST
//! endpoint: parameters are sorted, concatenated with the API secret, and
//! SHA-256 signed (hex). The response carries the hosted HTTPS URL that goes
//! into the catalog row.

use chrono::Utc;
use reqwest::multipart;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::ImageHostConfig;

/// Upload endpoint base; the cloud name slots into the path.
const BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Errors that can occur when talking to the image host.
#[derive(Debug, Error)]
pub enum UploadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the external image host.
#[derive(Clone)]
pub struct ImageHostClient {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: SecretString,
    folder: String,
}

/// The slice of the upload response we care about.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl ImageHostClient {
    /// Create a new image host client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ImageHostConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        })
    }

    /// Upload one image; returns the hosted HTTPS URL.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the host rejects the upload, or
    /// the response cannot be parsed.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<String, UploadError> {
        let url = format!("{BASE_URL}/{}/image/upload", self.cloud_name);
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_upload(&self.folder, &timestamp, self.api_secret.expose_secret());

        let file_part = multipart::Part::bytes(bytes).file_name(filename.to_owned());
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.folder.clone())
            .text("signature", signature);

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::Parse(e.to_string()))?;

        Ok(parsed.secure_url)
    }
}

/// Signature over the signed parameters, alphabetical, ampersand-joined,
/// secret appended, SHA-256, hex. The file itself and `api_key` stay out of
/// the signature per the host's protocol.
fn sign_upload(folder: &str, timestamp: &str, secret: &str) -> String {
    let payload = format!("folder={folder}&timestamp={timestamp}{secret}");
    hex::encode(Sha256::digest(payload.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_hex_sha256_of_sorted_params() {
        let signature = sign_upload("marigold", "1700000000", "shhh");
        // sha256("folder=marigold&timestamp=1700000000shhh")
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));

        // Deterministic for the same inputs, different otherwise
        assert_eq!(signature, sign_upload("marigold", "1700000000", "shhh"));
        assert_ne!(signature, sign_upload("marigold", "1700000001", "shhh"));
        assert_ne!(signature, sign_upload("marigold", "1700000000", "hush"));
    }
}
