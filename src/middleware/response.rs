use hyper::{header, StatusCode};
use serde::Serialize;
use tracing::error;
use super::{empty, full, Response};

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// 바디 없이 상태 코드만 가진 응답을 생성합니다.
pub fn empty_response(status: StatusCode) -> Response {
    let mut response = Response::new(empty());
    *response.status_mut() = status;
    response
}

/// `{"error": "<message>"}` 형태의 JSON 에러 응답을 생성합니다.
pub fn json_error_response(status: StatusCode, message: &str) -> Response {
    let body = match serde_json::to_vec(&ErrorBody { error: message }) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "에러 응답 직렬화 실패");
            return empty_response(status);
        }
    };

    let mut response = Response::new(full(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}
