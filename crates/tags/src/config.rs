//! Configuration loading for the tag service client
//!
//! Supports loading service credentials from (in order of priority):
//! 1. JSON file (~/.config/vela/tag-service.json)
//! 2. Runtime environment variables (fallback)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Credentials filename in the Vela config directory
const CREDENTIALS_FILE: &str = "tag-service.json";

/// Connection details for the remote tag/action service
///
/// The session itself is established elsewhere; this is just where the
/// client finds the endpoint and the bearer token to attach.
#[derive(Debug, Clone)]
pub struct ServiceCredentials {
    pub endpoint: String,
    pub auth_token: String,
}

/// Credential file format
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialFile {
    endpoint: String,
    auth_token: String,
}

impl ServiceCredentials {
    /// Load credentials using the following priority:
    /// 1. JSON file (~/.config/vela/tag-service.json)
    /// 2. Runtime environment variables
    pub fn load() -> Result<Self> {
        if config::config_exists(CREDENTIALS_FILE) {
            let file: CredentialFile = config::load_json(CREDENTIALS_FILE)?;
            return Ok(Self::from_credential_file(file));
        }
        Self::from_env()
    }

    /// Load credentials from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: CredentialFile = config::load_json_file(path)?;
        Ok(Self::from_credential_file(file))
    }

    /// Parse credentials from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CredentialFile =
            serde_json::from_str(json).context("Failed to parse credentials JSON")?;
        Ok(Self::from_credential_file(file))
    }

    /// Load credentials from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("VELA_TAG_ENDPOINT")
            .context("VELA_TAG_ENDPOINT environment variable not set")?;
        let auth_token = std::env::var("VELA_TAG_TOKEN")
            .context("VELA_TAG_TOKEN environment variable not set")?;

        Ok(Self {
            endpoint,
            auth_token,
        })
    }

    /// Check if credentials are available (file or env vars)
    pub fn is_available() -> bool {
        if config::config_exists(CREDENTIALS_FILE) {
            return true;
        }
        std::env::var("VELA_TAG_ENDPOINT").is_ok() && std::env::var("VELA_TAG_TOKEN").is_ok()
    }

    fn from_credential_file(file: CredentialFile) -> Self {
        Self {
            endpoint: file.endpoint,
            auth_token: file.auth_token,
        }
    }
}
