//! Forward Request는 요청을 외부 인증/토큰 서버로 먼저 전달하여 통과 여부를
//! 결정하는 리버스 프록시 미들웨어입니다.
//!
//! # 주요 기능
//!
//! - 원본 요청으로부터 포워드 요청 구성 (메서드 정책, 바디 모드)
//! - 리다이렉트를 따라가지 않는 공유 HTTP 클라이언트
//! - 2xx 응답: 허용된 헤더를 원본 요청에 반영하고 다음 핸들러로 위임
//! - 그 외 응답: hop-by-hop 헤더를 제외하고 호출자에게 그대로 반환
//! - OAuth 토큰 응답에서 Authorization 헤더 추출
//!
//! # 예제
//!
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use forward_request::middleware::{empty_response, Handler, Request, Response};
//! use forward_request::middleware::forward_request::{
//!     create_config, ForwardClient, ForwardRequest,
//! };
//!
//! struct App;
//!
//! #[async_trait]
//! impl Handler for App {
//!     async fn handle(&self, _req: Request) -> Response {
//!         empty_response(hyper::StatusCode::OK)
//!     }
//! }
//!
//! let mut config = create_config();
//! config.url = "https://auth.example.com/verify".to_string();
//! config.response_headers = vec!["X-Auth".to_string()];
//!
//! let client = ForwardClient::default();
//! let middleware = ForwardRequest::new(client, Arc::new(App), &config, "auth").unwrap();
//! ```

pub mod logging;
pub mod middleware;
pub mod proxy;
pub mod server;
pub mod settings;
