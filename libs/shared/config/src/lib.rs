use std::env;
use std::time::Duration;
use tracing::warn;

const DEFAULT_RECORD_STORE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Bearer token for server-side reads. Falls back to the anon key when unset.
    pub supabase_service_key: Option<String>,
    pub record_store_timeout_secs: u64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_service_key: env::var("SUPABASE_SERVICE_ROLE_KEY").ok()
                .filter(|key| !key.is_empty()),
            record_store_timeout_secs: parse_or_default(
                "RECORD_STORE_TIMEOUT_SECS",
                DEFAULT_RECORD_STORE_TIMEOUT_SECS,
            ),
            port: parse_or_default("PORT", DEFAULT_PORT),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
    }

    pub fn record_store_timeout(&self) -> Duration {
        Duration::from_secs(self.record_store_timeout_secs)
    }

    /// Token sent as `Authorization: Bearer` on record-store calls.
    pub fn record_store_token(&self) -> &str {
        self.supabase_service_key.as_deref().unwrap_or(&self.supabase_anon_key)
    }
}

fn parse_or_default<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid value ({}), using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
