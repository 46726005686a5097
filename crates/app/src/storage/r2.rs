//! Cloudflare R2 client.
//!
//! R2 speaks the S3 wire protocol, so uploads are plain `PUT`s signed with
//! AWS Signature Version 4. The region is always `"auto"`.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use jiff::Timestamp;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use super::{StorageService, StorageServiceError};

type HmacSha256 = Hmac<Sha256>;

const REGION: &str = "auto";
const SERVICE: &str = "s3";
const SIGNED_HEADERS: &str = "content-type;host;x-amz-content-sha256;x-amz-date";

/// Configuration for connecting to an R2 bucket.
#[derive(Debug, Clone, Default)]
pub struct R2Config {
    /// Cloudflare account identifier.
    pub account_id: Option<String>,

    /// S3-compatible access key.
    pub access_key_id: Option<String>,

    /// S3-compatible secret key.
    pub secret_access_key: Option<String>,

    /// Bucket holding uploaded images.
    pub bucket: String,

    /// Public base URL the bucket is served from, if one is configured.
    pub public_url: Option<String>,
}

impl R2Config {
    fn credentials(&self) -> Option<(&str, &str, &str)> {
        match (
            self.account_id.as_deref(),
            self.access_key_id.as_deref(),
            self.secret_access_key.as_deref(),
        ) {
            (Some(account), Some(key), Some(secret)) => Some((account, key, secret)),
            _ => None,
        }
    }
}

/// HTTP client for R2 uploads.
#[derive(Debug, Clone)]
pub struct R2Storage {
    config: R2Config,
    http: Client,
}

impl R2Storage {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: R2Config) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Object key for a new upload: a timestamped name under `pr_images/`
    /// with a short random tail to avoid collisions within a second.
    fn object_key(filename: &str, now: Timestamp) -> String {
        let stamp = now.strftime("%Y%m%d_%H%M%S");

        let hex = Uuid::now_v7().simple().to_string();
        let tail = &hex[hex.len() - 8..];

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        format!("pr_images/{stamp}_{tail}.{extension}")
    }

    fn public_object_url(&self, account_id: &str, key: &str) -> String {
        match self.config.public_url.as_deref() {
            Some(base) => format!("{}/{key}", base.trim_end_matches('/')),
            None => format!(
                "https://{account_id}.r2.cloudflarestorage.com/{}/{key}",
                self.config.bucket
            ),
        }
    }
}

#[async_trait]
impl StorageService for R2Storage {
    #[tracing::instrument(
        name = "storage.r2.upload_image",
        skip(self, content),
        fields(size = content.len()),
        err
    )]
    async fn upload_image(
        &self,
        content: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<String, StorageServiceError> {
        let Some((account_id, access_key_id, secret_access_key)) = self.config.credentials()
        else {
            return Err(StorageServiceError::NotConfigured);
        };

        let now = Timestamp::now();
        let key = Self::object_key(filename, now);

        let host = format!("{account_id}.r2.cloudflarestorage.com");
        let uri = format!("/{}/{key}", self.config.bucket);
        let url = format!("https://{host}{uri}");

        let amz_date = now.strftime("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.strftime("%Y%m%d").to_string();

        let payload_hash = hex_sha256(&content);

        let canonical_request = format!(
            "PUT\n{uri}\n\n\
             content-type:{content_type}\n\
             host:{host}\n\
             x-amz-content-sha256:{payload_hash}\n\
             x-amz-date:{amz_date}\n\n\
             {SIGNED_HEADERS}\n{payload_hash}"
        );

        let credential_scope = format!("{date_stamp}/{REGION}/{SERVICE}/aws4_request");

        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{amz_date}\n{credential_scope}\n{}",
            hex_sha256(canonical_request.as_bytes())
        );

        let signing_key = derive_signing_key(secret_access_key, &date_stamp);
        let signature = hex_hmac(&signing_key, string_to_sign.as_bytes());

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={access_key_id}/{credential_scope}, \
             SignedHeaders={SIGNED_HEADERS}, Signature={signature}"
        );

        let response = self
            .http
            .put(&url)
            .header("authorization", authorization)
            .header("content-type", content_type)
            .header("x-amz-content-sha256", payload_hash)
            .header("x-amz-date", amz_date)
            .body(content)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(StorageServiceError::UnexpectedResponse(format!(
                "upload failed with status {status}: {text}"
            )));
        }

        let public_url = self.public_object_url(account_id, &key);

        info!(%key, "uploaded image");

        Ok(public_url)
    }
}

fn hex_sha256(input: &[u8]) -> String {
    format!("{:x}", Sha256::digest(input))
}

fn hmac_sha256(key: &[u8], input: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC-SHA256 accepts any key length");

    mac.update(input);

    mac.finalize().into_bytes().to_vec()
}

fn hex_hmac(key: &[u8], input: &[u8]) -> String {
    hmac_sha256(key, input)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// AWS SigV4 key derivation chain.
fn derive_signing_key(secret_access_key: &str, date_stamp: &str) -> Vec<u8> {
    let key = hmac_sha256(
        format!("AWS4{secret_access_key}").as_bytes(),
        date_stamp.as_bytes(),
    );
    let key = hmac_sha256(&key, REGION.as_bytes());
    let key = hmac_sha256(&key, SERVICE.as_bytes());

    hmac_sha256(&key, b"aws4_request")
}
