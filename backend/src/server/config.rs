//! Application configuration from CLI flags and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Runtime configuration for the backend.
///
/// Every knob is a CLI flag with an environment fallback, so containerised
/// deployments configure the process purely through the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "backend", about = "Hotel daily-menu backend")]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5000")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Shared secret for signing session tokens.
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: String,

    /// Media store upload endpoint.
    #[arg(
        long,
        env = "MEDIA_STORE_ENDPOINT",
        default_value = "https://upload.imagekit.io/api/v1/files/upload"
    )]
    pub media_store_endpoint: String,

    /// Media store private key; absent or placeholder values select the
    /// inline `data:` URI fallback.
    #[arg(long, env = "MEDIA_STORE_PRIVATE_KEY")]
    pub media_store_private_key: Option<String>,

    /// Contact subject embedded in VAPID tokens.
    #[arg(long, env = "VAPID_SUBJECT", default_value = "mailto:admin@example.com")]
    pub vapid_subject: String,

    /// Public VAPID key served to subscribing clients.
    #[arg(long, env = "VAPID_PUBLIC_KEY", default_value = "")]
    pub vapid_public_key: String,

    /// Path to the VAPID private key (PKCS#8 PEM); absent selects the
    /// logging push transport.
    #[arg(long, env = "VAPID_PRIVATE_KEY_FILE")]
    pub vapid_private_key_file: Option<PathBuf>,

    /// SMS gateway endpoint; absent selects the logging relay.
    #[arg(long, env = "SMS_GATEWAY_URL")]
    pub sms_gateway_url: Option<String>,

    /// One-time code lifetime in seconds.
    #[arg(long, env = "OTP_TTL_SECONDS", default_value_t = 500)]
    pub otp_ttl_seconds: u64,

    /// Rate-limit window for send-otp, in seconds.
    #[arg(long, env = "OTP_RATE_WINDOW_SECONDS", default_value_t = 900)]
    pub otp_rate_window_seconds: u64,

    /// Maximum send-otp requests per source per window.
    #[arg(long, env = "OTP_RATE_MAX_REQUESTS", default_value_t = 10)]
    pub otp_rate_max_requests: u32,
}

/// Whether a credential value is missing-in-spirit: empty or an unreplaced
/// template placeholder like `your_imagekit_private_key`.
fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.starts_with("your_")
}

impl AppConfig {
    /// The media store private key, when configured with a real value.
    ///
    /// Presence decides which blob sink is wired, not connectivity: a
    /// present-but-wrong key still takes the real path and surfaces upload
    /// failures as server errors.
    pub fn media_store_credential(&self) -> Option<&str> {
        self.media_store_private_key
            .as_deref()
            .filter(|key| !is_placeholder(key))
    }

    /// The VAPID key material, when both halves are configured.
    pub fn vapid_material(&self) -> Option<(&str, &PathBuf)> {
        if is_placeholder(&self.vapid_public_key) {
            return None;
        }
        self.vapid_private_key_file
            .as_ref()
            .map(|path| (self.vapid_public_key.as_str(), path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config_with_media_key(key: Option<&str>) -> AppConfig {
        let mut args = vec![
            "backend".to_owned(),
            "--database-url".to_owned(),
            "postgres://localhost/menus".to_owned(),
            "--jwt-secret".to_owned(),
            "secret".to_owned(),
        ];
        if let Some(key) = key {
            args.push("--media-store-private-key".to_owned());
            args.push(key.to_owned());
        }
        AppConfig::parse_from(args)
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("your_imagekit_private_key"))]
    fn placeholder_credentials_select_the_fallback(#[case] key: Option<&str>) {
        assert_eq!(config_with_media_key(key).media_store_credential(), None);
    }

    #[rstest]
    fn real_credentials_select_the_store() {
        let config = config_with_media_key(Some("private_k3y"));
        assert_eq!(config.media_store_credential(), Some("private_k3y"));
    }

    #[rstest]
    fn vapid_material_requires_both_halves() {
        let config = config_with_media_key(None);
        assert_eq!(config.vapid_material(), None);
    }
}
