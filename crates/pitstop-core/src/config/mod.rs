//! Client configuration.
//!
//! `ClientConfig` carries the public Supabase project URL and anon key that
//! every client needs to reach auth and the REST tables. Values may come from
//! flags, the environment, a stored CLI profile, or a bootstrap manifest.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::AuthError;
use crate::util::{compact_text, is_http_url, normalize_text_option};

const BOOTSTRAP_SCHEMA_VERSION: u32 = 1;
const BOOTSTRAP_HTTP_TIMEOUT_SECS: u64 = 4;

/// Public Supabase project settings. Secret credentials must never be stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl ClientConfig {
    /// GoTrue base URL (`…/auth/v1`).
    pub fn auth_url(&self) -> Result<String, &'static str> {
        normalize_service_url(&self.supabase_url, "/auth/v1")
    }

    /// PostgREST base URL (`…/rest/v1`).
    pub fn rest_url(&self) -> Result<String, &'static str> {
        normalize_service_url(&self.supabase_url, "/rest/v1")
    }
}

/// Combine optional URL and key into a config.
///
/// Both missing means "not configured" (`Ok(None)`); only one present is an
/// error because the other half was clearly intended.
pub fn resolve_supabase_config(
    url: Option<String>,
    anon_key: Option<String>,
) -> Result<Option<ClientConfig>, AuthError> {
    let url = normalize_text_option(url);
    let anon_key = normalize_text_option(anon_key);

    match (url, anon_key) {
        (None, None) => Ok(None),
        (Some(supabase_url), Some(supabase_anon_key)) => Ok(Some(ClientConfig {
            supabase_url,
            supabase_anon_key,
        })),
        _ => Err(AuthError::NotConfigured),
    }
}

/// Normalize a project URL and make sure it ends with `suffix`.
///
/// Accepts either the bare project URL or one already pointing at another
/// Supabase service path (`/auth/v1`, `/rest/v1`).
pub fn normalize_service_url(url: &str, suffix: &str) -> Result<String, &'static str> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("Supabase URL must not be empty");
    }
    if !is_http_url(trimmed) {
        return Err("Supabase URL must include http:// or https://");
    }

    let base = trimmed
        .strip_suffix("/auth/v1")
        .or_else(|| trimmed.strip_suffix("/rest/v1"))
        .unwrap_or(trimmed);
    Ok(format!("{base}{suffix}"))
}

/// Parse a bootstrap manifest from a raw JSON payload.
pub fn parse_bootstrap_manifest(payload: &str) -> Result<ClientConfig, String> {
    let manifest: BootstrapManifest = serde_json::from_str(payload)
        .map_err(|error| format!("invalid bootstrap manifest JSON: {error}"))?;
    manifest.into_client_config()
}

/// Fetch and parse a bootstrap manifest.
pub async fn fetch_bootstrap_manifest(url: &str) -> Result<ClientConfig, String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(BOOTSTRAP_HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|error| format!("failed to build bootstrap HTTP client: {error}"))?;

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|error| format!("bootstrap request failed: {error}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| format!("failed to read bootstrap response body: {error}"))?;
    if !status.is_success() {
        return Err(format!(
            "bootstrap endpoint returned HTTP {}: {}",
            status.as_u16(),
            compact_text(&body)
        ));
    }

    parse_bootstrap_manifest(&body)
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct BootstrapManifest {
    schema_version: u32,
    supabase_url: String,
    supabase_anon_key: String,
}

impl BootstrapManifest {
    fn into_client_config(self) -> Result<ClientConfig, String> {
        if self.schema_version != BOOTSTRAP_SCHEMA_VERSION {
            return Err(format!(
                "unsupported bootstrap schema_version {} (expected {})",
                self.schema_version, BOOTSTRAP_SCHEMA_VERSION
            ));
        }

        let supabase_url = normalize_text_option(Some(self.supabase_url))
            .ok_or_else(|| "bootstrap field 'supabase_url' is required".to_string())?;
        if !is_http_url(&supabase_url) {
            return Err(
                "bootstrap field 'supabase_url' must include http:// or https://".to_string(),
            );
        }
        let supabase_anon_key = normalize_text_option(Some(self.supabase_anon_key))
            .ok_or_else(|| "bootstrap field 'supabase_anon_key' is required".to_string())?;

        Ok(ClientConfig {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
        })
    }
}
