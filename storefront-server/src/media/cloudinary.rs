//! Cloudinary integration via REST API (no SDK dependency)
//!
//! POST {api_base}/{cloud_name}/image/upload, multipart, signed.
//!
//! The signature is SHA-256 over the signed params sorted by name and joined
//! as `k=v&k=v`, with the API secret appended. `signature_algorithm=sha256`
//! is sent alongside it and is not part of the signed params.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{ImageUpload, MediaError, MediaStore};
use crate::core::config::MediaConfig;

const SIGNATURE_ALGORITHM: &str = "sha256";

/// Content type for file parts whose declared type does not parse
const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    public_id: Option<String>,
}

#[derive(Deserialize)]
struct CloudinaryErrorBody {
    error: CloudinaryErrorDetail,
}

#[derive(Deserialize)]
struct CloudinaryErrorDetail {
    message: String,
}

/// Signed-upload client for one Cloudinary account
#[derive(Clone)]
pub struct Cloudinary {
    http: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    api_base: String,
}

impl std::fmt::Debug for Cloudinary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cloudinary")
            .field("cloud_name", &self.cloud_name)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl Cloudinary {
    pub fn new(config: &MediaConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", self.api_base, self.cloud_name)
    }
}

#[async_trait::async_trait]
impl MediaStore for Cloudinary {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", &image.folder), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let size = image.bytes.len();
        let file = file_part(&image);

        let form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", image.folder.clone())
            .text("signature_algorithm", SIGNATURE_ALGORITHM)
            .text("signature", signature)
            .part("file", file);

        let resp = self.http.post(self.upload_url()).multipart(form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<CloudinaryErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = resp.json().await?;
        let url = uploaded
            .secure_url
            .or(uploaded.url)
            .ok_or(MediaError::MissingUrl)?;

        tracing::info!(
            folder = %image.folder,
            public_id = ?uploaded.public_id,
            size,
            "Image uploaded to Cloudinary"
        );

        Ok(url)
    }
}

/// File part for the upload form
///
/// The client's declared content type is passed through when it parses and
/// replaced with `application/octet-stream` when it does not.
fn file_part(image: &ImageUpload) -> Part {
    let file_name = image
        .file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());
    let part = || Part::bytes(image.bytes.to_vec()).file_name(file_name.clone());

    let content_type = image.content_type.as_deref().unwrap_or(OCTET_STREAM);
    part()
        .mime_str(content_type)
        .or_else(|_| {
            tracing::debug!(content_type, "Unparseable file content type, sending octet-stream");
            part().mime_str(OCTET_STREAM)
        })
        .unwrap_or_else(|_| part())
}

/// Cloudinary request signature (SHA-256, lowercase hex)
///
/// Empty values are left out, as Cloudinary ignores them when verifying.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut signed: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    signed.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
