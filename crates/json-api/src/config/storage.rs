//! Storage Config

use clap::Args;
use pr_maker_app::storage::R2Config;

/// R2 image storage settings.
///
/// Uploads fail with a configuration error at request time when the
/// credentials are absent; the rest of the API works without them.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Cloudflare account identifier
    #[arg(long, env = "R2_ACCOUNT_ID")]
    pub r2_account_id: Option<String>,

    /// R2 access key
    #[arg(long, env = "R2_ACCESS_KEY_ID", hide_env_values = true)]
    pub r2_access_key_id: Option<String>,

    /// R2 secret key
    #[arg(long, env = "R2_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub r2_secret_access_key: Option<String>,

    /// Bucket holding uploaded images
    #[arg(long, env = "R2_BUCKET_NAME", default_value = "pr-maker-images")]
    pub r2_bucket_name: String,

    /// Public base URL the bucket is served from
    #[arg(long, env = "R2_PUBLIC_URL")]
    pub r2_public_url: Option<String>,
}

impl From<StorageConfig> for R2Config {
    fn from(config: StorageConfig) -> Self {
        R2Config {
            account_id: config.r2_account_id,
            access_key_id: config.r2_access_key_id,
            secret_access_key: config.r2_secret_access_key,
            bucket: config.r2_bucket_name,
            public_url: config.r2_public_url,
        }
    }
}
