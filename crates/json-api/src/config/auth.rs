//! Auth Config

use clap::Args;

/// API key authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Shared secret expected in the `X-Api-Key` request header
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,
}
