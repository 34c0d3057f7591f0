use hyper::Uri;
use serde::Deserialize;
use std::env;
use super::SettingsError;

/// 체인 끝에서 요청을 받을 백엔드 설정
#[derive(Clone, Debug, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

impl BackendSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            url: env::var("PROXY_BACKEND_URL").unwrap_or_else(|_| default_backend_url()),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.uri().map(|_| ())
    }

    pub fn uri(&self) -> Result<Uri, SettingsError> {
        let uri: Uri = self.url.parse().map_err(|e: hyper::http::uri::InvalidUri| {
            SettingsError::InvalidConfig(format!("잘못된 backend.url {}: {}", self.url, e))
        })?;

        match (uri.scheme_str(), uri.authority()) {
            (Some("http") | Some("https"), Some(_)) => Ok(uri),
            _ => Err(SettingsError::InvalidConfig(format!(
                "backend.url은 http(s) 절대 경로여야 합니다: {}",
                self.url
            ))),
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
        }
    }
}
