use hyper::header::HeaderName;
use hyper::Uri;
use serde::{Deserialize, Serialize};
use crate::middleware::MiddlewareError;

/// 포워드 요청 메서드 정책
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MethodPolicy {
    /// 원본 요청 메서드를 그대로 사용
    #[default]
    Preserve,
    /// 항상 POST로 전송
    Post,
}

/// 포워드 요청 바디 구성 방식
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// 원본 바디 스트림을 읽지 않고 그대로 넘김
    #[default]
    Passthrough,
    /// 원본 바디를 모두 읽은 뒤 같은 바이트를 전송
    Buffered,
    /// 쿼리 파라미터를 form-urlencoded 바디로 다시 인코딩
    Form,
}

/// 2xx 응답 헤더를 계속 진행하는 요청에 반영하는 방식
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPropagation {
    /// 허용 목록 헤더의 기존 값을 지우고 응답 값으로 교체
    #[default]
    Override,
    /// 기존 값 뒤에 응답 값을 추가
    Merge,
}

/// 토큰 추출 방식
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    #[default]
    Off,
    /// 2xx 토큰 응답에서 Authorization 헤더를 만들어 계속 진행하는 요청에 설정
    Request,
    /// 2xx 토큰 응답을 호출자에게 돌려주며 Authorization 헤더를 추가
    Response,
}

/// 포워드 요청 미들웨어 설정
///
/// # TOML 예시
///
/// ```toml
/// [middlewares.auth]
/// middleware_type = "forward-request"
///
/// [middlewares.auth.settings]
/// url = "https://auth.example.com/verify"
/// responseHeaders = ["X-Auth"]
/// method = "post"
/// body = "form"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ForwardRequestConfig {
    /// 요청을 전달할 절대 URL
    #[serde(default)]
    pub url: String,

    /// 2xx 응답에서 계속 진행하는 요청으로 복사할 헤더 이름
    #[serde(default)]
    pub response_headers: Vec<String>,

    #[serde(default)]
    pub method: MethodPolicy,

    #[serde(default)]
    pub body: BodyMode,

    #[serde(default)]
    pub header_propagation: HeaderPropagation,

    #[serde(default)]
    pub token: TokenMode,
}

/// 기본값으로 채워진 설정을 생성합니다.
pub fn create_config() -> ForwardRequestConfig {
    ForwardRequestConfig::default()
}

impl ForwardRequestConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 미들웨어 설정 맵에서 변환합니다.
    pub fn from_settings(
        settings: &std::collections::HashMap<String, serde_json::Value>,
    ) -> Result<Self, MiddlewareError> {
        let value = serde_json::to_value(settings)?;
        Ok(serde_json::from_value(value)?)
    }

    /// 대상 URL을 검증하고 파싱합니다.
    pub fn target(&self) -> Result<Uri, MiddlewareError> {
        if self.url.is_empty() {
            return Err(MiddlewareError::Config("url은 필수 항목입니다".to_string()));
        }

        let parsed = url::Url::parse(&self.url)
            .map_err(|e| MiddlewareError::Config(format!("잘못된 url {}: {}", self.url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            return Err(MiddlewareError::Config(format!(
                "url은 http(s) 절대 경로여야 합니다: {}",
                self.url
            )));
        }

        parsed
            .as_str()
            .parse::<Uri>()
            .map_err(|e| MiddlewareError::Config(format!("잘못된 url {}: {}", self.url, e)))
    }

    /// 허용 목록 헤더 이름을 검증하고 파싱합니다.
    pub fn allowed_headers(&self) -> Result<Vec<HeaderName>, MiddlewareError> {
        self.response_headers
            .iter()
            .map(|name| {
                HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| {
                    MiddlewareError::Config(format!("잘못된 헤더 이름 {}: {}", name, e))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = create_config();

        assert!(config.url.is_empty());
        assert!(config.response_headers.is_empty());
        assert_eq!(config.method, MethodPolicy::Preserve);
        assert_eq!(config.body, BodyMode::Passthrough);
        assert_eq!(config.header_propagation, HeaderPropagation::Override);
        assert_eq!(config.token, TokenMode::Off);
    }

    #[test]
    fn test_from_settings() {
        let mut settings = HashMap::new();
        settings.insert("url".to_string(), serde_json::json!("https://example.com/"));
        settings.insert("responseHeaders".to_string(), serde_json::json!(["X-Auth"]));
        settings.insert("method".to_string(), serde_json::json!("post"));
        settings.insert("body".to_string(), serde_json::json!("form"));
        settings.insert("headerPropagation".to_string(), serde_json::json!("merge"));
        settings.insert("token".to_string(), serde_json::json!("request"));

        let config = ForwardRequestConfig::from_settings(&settings).unwrap();

        assert_eq!(config.url, "https://example.com/");
        assert_eq!(config.response_headers, vec!["X-Auth".to_string()]);
        assert_eq!(config.method, MethodPolicy::Post);
        assert_eq!(config.body, BodyMode::Form);
        assert_eq!(config.header_propagation, HeaderPropagation::Merge);
        assert_eq!(config.token, TokenMode::Request);
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let mut settings = HashMap::new();
        settings.insert("url".to_string(), serde_json::json!("https://example.com/"));
        settings.insert("retries".to_string(), serde_json::json!(3));

        assert!(matches!(
            ForwardRequestConfig::from_settings(&settings),
            Err(MiddlewareError::Settings(_))
        ));
    }

    #[test]
    fn test_target_validation() {
        assert!(ForwardRequestConfig::new("https://example.com/").target().is_ok());
        assert!(ForwardRequestConfig::new("http://127.0.0.1:9000/auth?x=1").target().is_ok());

        for url in ["", "/relative/path", "ftp://example.com/", "not a url"] {
            assert!(
                matches!(ForwardRequestConfig::new(url).target(), Err(MiddlewareError::Config(_))),
                "url should be rejected: {:?}",
                url
            );
        }
    }

    #[test]
    fn test_allowed_headers() {
        let mut config = ForwardRequestConfig::new("https://example.com/");
        config.response_headers = vec!["X-Auth".to_string(), "Authorization".to_string()];

        let names = config.allowed_headers().unwrap();
        assert_eq!(names[0], "x-auth");
        assert_eq!(names[1], hyper::header::AUTHORIZATION);

        config.response_headers = vec!["bad header".to_string()];
        assert!(config.allowed_headers().is_err());
    }
}
