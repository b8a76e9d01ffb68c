use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;

use crate::i18n::Language;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8001";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Sidecar configuration loaded from environment variables.
///
/// | Env Var                        | Default                  |
/// |--------------------------------|--------------------------|
/// | `TUITION_API_BASE_URL`         | `http://127.0.0.1:8001`  |
/// | `TUITION_REQUEST_TIMEOUT_SECS` | `30`                     |
/// | `TUITION_LANGUAGE`             | `english`                |
/// | `TUITION_WORKSPACE`            | unset                    |
#[derive(Debug, Clone)]
pub struct SidecarConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub language: Language,
    /// Opened at startup when set, same as a `workspace.select` request.
    pub workspace: Option<PathBuf>,
}

impl SidecarConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_base_url = get("TUITION_API_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let request_timeout_secs = match get("TUITION_REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("TUITION_REQUEST_TIMEOUT_SECS must be a whole number, got {v:?}"))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let language = match get("TUITION_LANGUAGE") {
            Some(v) => Language::parse(&v)
                .with_context(|| format!("TUITION_LANGUAGE must be english or sinhala, got {v:?}"))?,
            None => Language::default(),
        };

        let workspace = get("TUITION_WORKSPACE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            language,
            workspace,
        })
    }
}
