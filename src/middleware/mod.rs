pub mod config;
pub mod error;
pub mod forward_request;
pub mod manager;
pub mod response;
pub mod traits;

use bytes::Bytes;
use http_body_util::{combinators::BoxBody, BodyExt, Empty, Full};

pub use config::{MiddlewareConfig, MiddlewareType};
pub use error::MiddlewareError;
pub use manager::{MiddlewareContext, MiddlewareManager};
pub use response::{empty_response, json_error_response};
pub use traits::{Handler, Middleware};

/// 바디 에러 타입
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 파이프라인 전체에서 사용하는 요청/응답 바디
pub type Body = BoxBody<Bytes, BoxError>;

pub type Request = hyper::Request<Body>;
pub type Response = hyper::Response<Body>;

/// 메모리 상의 바이트로 바디를 생성합니다.
pub fn full(bytes: impl Into<Bytes>) -> Body {
    Full::new(bytes.into())
        .map_err(|never| match never {})
        .boxed()
}

/// 빈 바디
pub fn empty() -> Body {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}

/// hyper 수신 바디를 파이프라인 바디로 변환합니다.
pub fn incoming(body: hyper::body::Incoming) -> Body {
    body.map_err(BoxError::from).boxed()
}
