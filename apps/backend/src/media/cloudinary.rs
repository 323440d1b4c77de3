//! Cloudinary upload API client.
//!
//! Requests are signed with a hex SHA-256 digest of the sorted
//! `key=value` parameters joined by `&`, followed by the API secret.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::{ImageHost, MediaError, UploadedImage};
use crate::config::CloudinaryConfig;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http_client: Client,
    config: CloudinaryConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig, timeout: std::time::Duration) -> Result<Self, MediaError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MediaError::Request(format!("failed to build HTTP client: {e}")))?;

        debug!(cloud_name = %config.cloud_name, ?timeout, "Cloudinary client initialized");

        Ok(Self {
            http_client,
            config,
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.config.cloud_name)
    }

    /// `params` must already be sorted by key.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        sign_params(params, &self.config.api_secret)
    }
}

fn sign_params(params: &[(&str, &str)], secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

async fn rejected(response: reqwest::Response) -> MediaError {
    let status = response.status().as_u16();
    let detail = response.text().await.unwrap_or_default();
    MediaError::Rejected { status, detail }
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    async fn upload(
        &self,
        image: Bytes,
        content_type: &str,
        folder: &str,
    ) -> Result<UploadedImage, MediaError> {
        let timestamp = OffsetDateTime::now_utc().unix_timestamp().to_string();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp)]);

        let file = Part::bytes(image.to_vec())
            .file_name("upload")
            .mime_str(content_type)
            .map_err(|e| MediaError::Request(format!("invalid content type: {e}")))?;

        let form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature);

        let response = self
            .http_client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        debug!(public_id = %body.public_id, "image uploaded");
        Ok(UploadedImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), MediaError> {
        let timestamp = OffsetDateTime::now_utc().unix_timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let form = [
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.config.api_key.clone()),
            ("signature", signature),
        ];

        let response = self
            .http_client
            .post(self.endpoint("destroy"))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        match body.result.as_str() {
            "ok" => Ok(()),
            "not found" => {
                warn!(public_id = %public_id, "image already absent on host");
                Ok(())
            }
            other => Err(MediaError::InvalidResponse(format!(
                "destroy returned {other}"
            ))),
        }
    }
}
