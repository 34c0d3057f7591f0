//! 원본 요청으로부터 포워드 요청을 구성합니다.

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::header::{self, HeaderValue};
use hyper::{Method, Uri};
use url::form_urlencoded;
use crate::middleware::{empty, full, Request};
use super::config::{BodyMode, MethodPolicy};
use super::error::ForwardRequestError;

/// 구성 결과
///
/// `outbound`는 대상 URL로 보낼 요청이고, `inbound`는 다음 핸들러로 이어질
/// 원본 요청입니다. 두 요청은 헤더 맵을 공유하지 않습니다.
pub struct ForwardParts {
    pub outbound: Request,
    pub inbound: Request,
}

/// 포워드 요청 구성 옵션
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub target: Uri,
    pub method: MethodPolicy,
    pub body: BodyMode,
}

/// 원본 요청을 소비하여 포워드 요청과 계속 진행할 요청을 만듭니다.
pub async fn build_forward_request(
    req: Request,
    options: &BuildOptions,
) -> Result<ForwardParts, ForwardRequestError> {
    let method = match options.method {
        MethodPolicy::Preserve => req.method().clone(),
        MethodPolicy::Post => Method::POST,
    };

    let mut headers = req.headers().clone();
    // Host는 대상 URL에서 다시 결정된다
    headers.remove(header::HOST);

    let (mut parts, body) = req.into_parts();

    let (outbound_body, inbound_body) = match options.body {
        BodyMode::Passthrough => {
            // 바디가 포워드 요청으로 넘어가므로 남은 요청의 길이 헤더는 무효
            parts.headers.remove(header::CONTENT_LENGTH);
            parts.headers.remove(header::TRANSFER_ENCODING);
            (body, empty())
        }
        BodyMode::Buffered => {
            let bytes = body
                .collect()
                .await
                .map_err(|e| {
                    ForwardRequestError::RequestConstruction(format!("요청 바디 읽기 실패: {}", e))
                })?
                .to_bytes();
            (full(bytes.clone()), full(bytes))
        }
        BodyMode::Form => {
            let encoded = encode_query_as_form(parts.uri.query().unwrap_or_default())?;
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            );
            headers.insert(header::CONTENT_LENGTH, HeaderValue::from(encoded.len()));
            headers.remove(header::TRANSFER_ENCODING);
            (full(Bytes::from(encoded)), body)
        }
    };

    let mut builder = hyper::Request::builder()
        .method(method)
        .uri(options.target.clone());
    match builder.headers_mut() {
        Some(map) => *map = headers,
        None => {
            return Err(ForwardRequestError::RequestConstruction(
                "요청 빌더 초기화 실패".to_string(),
            ))
        }
    }

    let outbound = builder
        .body(outbound_body)
        .map_err(|e| ForwardRequestError::RequestConstruction(e.to_string()))?;
    let inbound = Request::from_parts(parts, inbound_body);

    Ok(ForwardParts { outbound, inbound })
}

/// 쿼리 문자열을 검증하고 키 순으로 정렬된 form-urlencoded 문자열로 만듭니다.
pub fn encode_query_as_form(query: &str) -> Result<String, ForwardRequestError> {
    let mut pairs = parse_query(query)?;
    pairs.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    Ok(serializer.finish())
}

/// 엄격한 쿼리 파싱
///
/// `;` 구분자와 잘못된 퍼센트 인코딩은 거부합니다.
pub fn parse_query(query: &str) -> Result<Vec<(String, String)>, ForwardRequestError> {
    let mut pairs = Vec::new();

    for segment in query.split('&') {
        if segment.is_empty() {
            continue;
        }
        if segment.contains(';') {
            return Err(ForwardRequestError::InvalidQuery(format!(
                "세미콜론 구분자는 허용되지 않음: {}",
                segment
            )));
        }
        validate_escapes(segment)?;

        if let Some((key, value)) = form_urlencoded::parse(segment.as_bytes()).next() {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }

    Ok(pairs)
}

fn validate_escapes(segment: &str) -> Result<(), ForwardRequestError> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(ForwardRequestError::InvalidQuery(format!(
                    "잘못된 퍼센트 인코딩: {}",
                    segment
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
