use std::{collections::HashMap, env, fs, path::Path};
use serde::Deserialize;
use tracing::{debug, info};
use crate::middleware::config::{MiddlewareConfig, MiddlewareType};

mod backend;
mod client;
mod error;
pub mod logging;
mod server;

pub use backend::BackendSettings;
pub use client::ClientSettings;
pub use error::SettingsError;
pub use logging::{LogFormat, LogOutput, LogSettings};
pub use server::{parse_env_var, ServerSettings};

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 서버 설정
    #[serde(default)]
    pub server: ServerSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 포워드 클라이언트 설정
    #[serde(default)]
    pub client: ClientSettings,

    /// 체인 끝 백엔드 설정
    #[serde(default)]
    pub backend: BackendSettings,

    /// 미들웨어 설정
    #[serde(default)]
    pub middlewares: HashMap<String, MiddlewareConfig>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("PROXY_CONFIG_FILE") {
            info!(path = %config_path, "설정 파일 로드");
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            client: ClientSettings::from_env()?,
            backend: BackendSettings::from_env()?,
            middlewares: HashMap::new(),
        };

        // 설정 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.client.validate()?;
        self.backend.validate()?;

        // 미들웨어 설정 검증
        for (name, middleware) in &self.middlewares {
            if !middleware.enabled {
                debug!(middleware = %name, "비활성화된 미들웨어 검증 생략");
                continue;
            }
            match middleware.middleware_type {
                MiddlewareType::ForwardRequest => {
                    let has_url = middleware.settings.get("url")
                        .and_then(|v| v.as_str())
                        .is_some_and(|url| !url.is_empty());
                    if !has_url {
                        return Err(SettingsError::InvalidConfig(
                            format!("{}.settings.url은 필수 항목입니다", name)
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
