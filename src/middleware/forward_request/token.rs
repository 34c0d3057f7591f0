use hyper::header::HeaderValue;
use serde::Deserialize;
use super::error::ForwardRequestError;

/// OAuth 형식의 토큰 응답
///
/// 알 수 없는 필드가 있으면 디코딩에 실패합니다.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub refresh_expires_in: Option<i64>,
    #[serde(default, rename = "not-before-policy")]
    pub not_before_policy: Option<i64>,
    #[serde(default)]
    pub session_state: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl Token {
    pub fn decode(body: &[u8]) -> Result<Self, ForwardRequestError> {
        serde_json::from_slice(body).map_err(|e| ForwardRequestError::TokenDecode(e.to_string()))
    }

    /// `<token_type> <access_token>` 형태의 Authorization 헤더 값
    pub fn authorization(&self) -> Result<HeaderValue, ForwardRequestError> {
        HeaderValue::try_from(format!("{} {}", self.token_type, self.access_token))
            .map_err(|e| ForwardRequestError::TokenDecode(e.to_string()))
    }
}
