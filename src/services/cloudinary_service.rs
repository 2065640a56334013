use crate::{config::CloudinaryConfig, utils::error::AppError};
use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}

/// Where profile photos go.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// `source` is a remote URL or a data URI.
    async fn upload(&self, source: &str, public_id: Option<&str>) -> Result<UploadedImage, AppError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct CloudinaryClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<CloudinaryConfig>,
}

impl CloudinaryClient {
    pub fn new(credentials: Option<CloudinaryConfig>) -> Result<Self, AppError> {
        Self::with_base_url(credentials, CLOUDINARY_API_BASE)
    }

    pub fn with_base_url(credentials: Option<CloudinaryConfig>, base_url: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn upload_url(&self, cloud_name: &str) -> String {
        format!("{}/v1_1/{}/image/upload", self.base_url, cloud_name)
    }
}

/// Hex SHA-256 of the sorted `key=value` pairs joined with `&`, followed by
/// the API secret. `file` and `api_key` are never part of `params`.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    async fn upload(&self, source: &str, public_id: Option<&str>) -> Result<UploadedImage, AppError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| AppError::ImageUpload("Cloudinary credentials are not configured".into()))?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let mut signed: Vec<(&str, &str)> = vec![("timestamp", timestamp.as_str())];
        if let Some(public_id) = public_id {
            signed.push(("public_id", public_id));
        }
        let signature = sign_params(&signed, &credentials.api_secret);

        let mut form = signed;
        form.push(("file", source));
        form.push(("api_key", credentials.api_key.as_str()));
        form.push(("signature", signature.as_str()));

        log::info!("☁️  Uploading photo to Cloudinary ({})", credentials.cloud_name);

        let response = self
            .http
            .post(self.upload_url(&credentials.cloud_name))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::ImageUpload(format!("Failed to reach Cloudinary: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(AppError::ImageUpload(format!("Cloudinary rejected upload: {}", message)));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::ImageUpload(format!("Failed to parse Cloudinary response: {}", e)))?;

        log::info!("✅ Photo uploaded: {}", body.public_id);

        Ok(UploadedImage {
            secure_url: body.secure_url,
            public_id: body.public_id,
        })
    }
}
