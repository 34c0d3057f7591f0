use serde::Deserialize;
use std::time::Duration;
use super::{server::parse_env_var, SettingsError};

/// 포워드 클라이언트 설정
#[derive(Clone, Debug, Deserialize)]
pub struct ClientSettings {
    /// 요청 제한 시간(초). 기본값 30
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 30 }

impl ClientSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            timeout_secs: parse_env_var("PROXY_FORWARD_TIMEOUT_SECS", default_timeout_secs)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.timeout_secs == 0 {
            return Err(SettingsError::InvalidConfig(
                "client.timeout_secs는 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}
