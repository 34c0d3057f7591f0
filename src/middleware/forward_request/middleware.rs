use std::sync::Arc;
use std::time::Instant;
use async_trait::async_trait;
use bytes::Bytes;
use hyper::header::{self, HeaderName, HeaderValue};
use hyper::http::response::Parts;
use hyper::Uri;
use tracing::debug;
use crate::logging::{log_request, RequestLog};
use crate::middleware::{
    empty_response, full, json_error_response, Handler, Middleware, MiddlewareError, Request,
    Response,
};
use super::builder::{build_forward_request, BuildOptions};
use super::client::{ForwardClient, ForwardedResponse};
use super::config::{ForwardRequestConfig, HeaderPropagation, TokenMode};
use super::error::ForwardRequestError;
use super::headers::{copy_headers, merge_headers, override_headers, remove_hop_headers};
use super::token::Token;

/// 포워드 요청 미들웨어
///
/// 요청을 설정된 URL로 먼저 전달하고, 응답 상태에 따라 파이프라인을 계속할지
/// 대상 서버의 응답으로 끝낼지 결정합니다.
pub struct ForwardRequest {
    name: String,
    next: Arc<dyn Handler>,
    client: ForwardClient,
    options: BuildOptions,
    /// Location 해석 기준 URL
    base: url::Url,
    response_headers: Vec<HeaderName>,
    header_propagation: HeaderPropagation,
    token: TokenMode,
}

/// 분류 결과
enum Outcome {
    /// 대상 서버 응답을 호출자에게 반환
    Proxied(Response),
    /// 다음 핸들러로 위임
    Delegated(Request),
}

impl ForwardRequest {
    /// 설정을 검증하고 미들웨어 인스턴스를 생성합니다.
    pub fn new(
        client: ForwardClient,
        next: Arc<dyn Handler>,
        config: &ForwardRequestConfig,
        name: impl Into<String>,
    ) -> Result<Self, MiddlewareError> {
        let target = config.target()?;
        let base = url::Url::parse(&target.to_string())
            .map_err(|e| MiddlewareError::Config(format!("잘못된 대상 URL {}: {}", target, e)))?;
        let response_headers = config.allowed_headers()?;

        Ok(Self {
            name: name.into(),
            next,
            client,
            options: BuildOptions {
                target,
                method: config.method,
                body: config.body,
            },
            base,
            response_headers,
            header_propagation: config.header_propagation,
            token: config.token,
        })
    }

    pub fn target(&self) -> &Uri {
        &self.options.target
    }

    async fn forward(&self, req: Request, log: &mut RequestLog) -> Result<Outcome, ForwardRequestError> {
        // BUILDING
        let parts = build_forward_request(req, &self.options).await?;

        // FORWARDING
        let forwarded = self.client.send(parts.outbound).await?;
        let status = forwarded.status();
        log.with_response(status);

        // CLASSIFYING
        if !status.is_success() {
            debug!(middleware = %self.name, status = %status, "2xx가 아닌 응답, 대상 서버 응답 반환");
            return Ok(Outcome::Proxied(self.proxied_response(forwarded, None).await?));
        }

        match self.token {
            TokenMode::Off => {
                let mut inbound = parts.inbound;
                self.propagate_headers(inbound.headers_mut(), forwarded.headers());
                Ok(Outcome::Delegated(inbound))
            }
            TokenMode::Request => {
                let (res_parts, body) = forwarded.into_bytes().await?;
                let authorization = Token::decode(&body)?.authorization()?;

                let mut inbound = parts.inbound;
                self.propagate_headers(inbound.headers_mut(), &res_parts.headers);
                inbound.headers_mut().insert(header::AUTHORIZATION, authorization);
                Ok(Outcome::Delegated(inbound))
            }
            TokenMode::Response => {
                let (res_parts, body) = forwarded.into_bytes().await?;
                let authorization = Token::decode(&body)?.authorization()?;
                Ok(Outcome::Proxied(self.write_forward_response(
                    res_parts,
                    body,
                    Some(authorization),
                )?))
            }
        }
    }

    fn propagate_headers(&self, dst: &mut hyper::HeaderMap, src: &hyper::HeaderMap) {
        match self.header_propagation {
            HeaderPropagation::Override => override_headers(dst, src, &self.response_headers),
            HeaderPropagation::Merge => merge_headers(dst, src, &self.response_headers),
        }
    }

    async fn proxied_response(
        &self,
        forwarded: ForwardedResponse,
        authorization: Option<HeaderValue>,
    ) -> Result<Response, ForwardRequestError> {
        let (parts, body) = forwarded.into_bytes().await?;
        self.write_forward_response(parts, body, authorization)
    }

    /// 대상 서버 응답으로 호출자 응답을 만듭니다.
    ///
    /// 헤더 복사, hop-by-hop 제거, Location 재설정 순으로 적용한 뒤 바디를 그대로 씁니다.
    fn write_forward_response(
        &self,
        parts: Parts,
        body: Bytes,
        authorization: Option<HeaderValue>,
    ) -> Result<Response, ForwardRequestError> {
        let location = self.redirect_location(&parts.headers)?;

        let mut response = Response::new(full(body));
        *response.status_mut() = parts.status;

        let headers = response.headers_mut();
        copy_headers(headers, &parts.headers);
        remove_hop_headers(headers);
        if let Some(location) = location {
            headers.insert(header::LOCATION, location);
        }
        if let Some(authorization) = authorization {
            headers.insert(header::AUTHORIZATION, authorization);
        }

        Ok(response)
    }

    /// Location 헤더를 검증합니다. 값은 바이트 그대로 유지됩니다.
    fn redirect_location(
        &self,
        headers: &hyper::HeaderMap,
    ) -> Result<Option<HeaderValue>, ForwardRequestError> {
        let Some(value) = headers.get(header::LOCATION) else {
            return Ok(None);
        };

        let location = value
            .to_str()
            .map_err(|e| ForwardRequestError::Response(format!("잘못된 Location 헤더: {}", e)))?;
        if location.is_empty() {
            return Ok(None);
        }

        self.base.join(location).map_err(|e| {
            ForwardRequestError::Response(format!("잘못된 Location {}: {}", location, e))
        })?;

        Ok(Some(value.clone()))
    }

    fn error_response(&self, err: &ForwardRequestError) -> Response {
        match self.token {
            TokenMode::Off => empty_response(err.status()),
            TokenMode::Request | TokenMode::Response => {
                json_error_response(err.status(), &err.to_string())
            }
        }
    }
}

#[async_trait]
impl Handler for ForwardRequest {
    async fn handle(&self, req: Request) -> Response {
        let start_time = Instant::now();
        let mut log = RequestLog::new(&self.name);
        log.with_request(&req);
        log.with_target(&self.options.target);

        let response = match self.forward(req, &mut log).await {
            Ok(Outcome::Proxied(response)) => {
                log.with_outcome("proxied");
                response
            }
            Ok(Outcome::Delegated(req)) => {
                log.with_outcome("delegated");
                log.duration_ms = start_time.elapsed().as_millis() as u64;
                log_request(&log);
                return self.next.handle(req).await;
            }
            Err(e) => {
                debug!(middleware = %self.name, kind = e.kind(), "포워드 요청 처리 실패");
                log.with_error(&e);
                log.with_outcome("error");
                self.error_response(&e)
            }
        };

        log.duration_ms = start_time.elapsed().as_millis() as u64;
        log_request(&log);
        response
    }
}

impl Middleware for ForwardRequest {
    fn name(&self) -> &str {
        &self.name
    }
}
