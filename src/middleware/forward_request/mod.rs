//! 포워드 요청 미들웨어
//!
//! 요청을 외부 인증/토큰 서버로 먼저 전달하고, 2xx 응답이면 허용된 헤더를 원본
//! 요청에 반영한 뒤 다음 핸들러로 넘깁니다. 그 외의 응답은 호출자에게 그대로
//! 돌려주고 파이프라인을 중단합니다.

mod builder;
mod client;
mod config;
mod error;
mod headers;
mod middleware;
mod token;

pub use builder::{build_forward_request, encode_query_as_form, parse_query, BuildOptions, ForwardParts};
pub use client::{ForwardClient, ForwardedResponse, DEFAULT_TIMEOUT};
pub use config::{
    create_config, BodyMode, ForwardRequestConfig, HeaderPropagation, MethodPolicy, TokenMode,
};
pub use error::ForwardRequestError;
pub use headers::{copy_headers, merge_headers, override_headers, remove_headers, remove_hop_headers, HOP_HEADERS};
pub use middleware::ForwardRequest;
pub use token::Token;
