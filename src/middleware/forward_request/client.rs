use std::time::Duration;
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::http::response::Parts;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{self, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use tokio::time::{timeout_at, Instant};
use tracing::debug;
use crate::middleware::{Body, Request};
use super::error::ForwardRequestError;

/// 기본 요청 제한 시간
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 포워드 요청 전송용 HTTP 클라이언트
///
/// 리다이렉트를 따라가지 않으며 3xx 응답을 그대로 반환합니다. 내부 커넥션 풀을
/// 공유하므로 복제해서 여러 요청에서 동시에 사용할 수 있습니다.
#[derive(Clone)]
pub struct ForwardClient {
    client: legacy::Client<HttpsConnector<HttpConnector>, Body>,
    timeout: Duration,
}

impl ForwardClient {
    pub fn new(timeout: Duration) -> Self {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = legacy::Client::builder(TokioExecutor::new())
            .build::<_, Body>(connector);

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 요청을 전송하고 응답 헤더가 도착할 때까지 기다립니다.
    pub async fn send(&self, req: Request) -> Result<ForwardedResponse, ForwardRequestError> {
        let deadline = Instant::now() + self.timeout;
        debug!(method = %req.method(), uri = %req.uri(), "포워드 요청 전송");

        let response = timeout_at(deadline, self.client.request(req))
            .await
            .map_err(|_| ForwardRequestError::Timeout(self.timeout))?
            .map_err(ForwardRequestError::Forward)?;

        let (parts, body) = response.into_parts();
        Ok(ForwardedResponse { parts, body, deadline })
    }
}

impl Default for ForwardClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// 포워드 요청의 응답
///
/// 바디는 한 번만 소비할 수 있으며 `into_bytes` 또는 `into_body`로 소유권을 넘깁니다.
pub struct ForwardedResponse {
    pub parts: Parts,
    body: Incoming,
    deadline: Instant,
}

impl ForwardedResponse {
    pub fn status(&self) -> hyper::StatusCode {
        self.parts.status
    }

    pub fn headers(&self) -> &hyper::HeaderMap {
        &self.parts.headers
    }

    /// 바디 전체를 읽습니다. 요청과 같은 제한 시간이 적용됩니다.
    pub async fn into_bytes(self) -> Result<(Parts, Bytes), ForwardRequestError> {
        let collected = timeout_at(self.deadline, self.body.collect())
            .await
            .map_err(|_| ForwardRequestError::ResponseRead("바디 읽기 시간 초과".to_string()))?
            .map_err(|e| ForwardRequestError::ResponseRead(e.to_string()))?;

        Ok((self.parts, collected.to_bytes()))
    }

    /// 바디를 읽지 않고 스트림 그대로 넘깁니다.
    pub fn into_body(self) -> (Parts, Body) {
        (self.parts, crate::middleware::incoming(self.body))
    }
}
