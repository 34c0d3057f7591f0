use hyper::StatusCode;

/// 포워드 요청 처리 중 발생하는 에러
///
/// 모든 에러는 호출자에게 종료 응답으로 변환되며 다음 핸들러로 전파되지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum ForwardRequestError {
    #[error("포워드 요청 생성 실패: {0}")]
    RequestConstruction(String),

    #[error("잘못된 쿼리 문자열: {0}")]
    InvalidQuery(String),

    #[error("대상 서버 요청 실패: {0}")]
    Forward(#[source] hyper_util::client::legacy::Error),

    #[error("대상 서버 응답 시간 초과 ({0:?})")]
    Timeout(std::time::Duration),

    #[error("대상 서버 응답 바디 읽기 실패: {0}")]
    ResponseRead(String),

    #[error("토큰 디코딩 실패: {0}")]
    TokenDecode(String),

    #[error("잘못된 응답: {0}")]
    Response(String),
}

impl ForwardRequestError {
    /// 호출자에게 돌려줄 상태 코드
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// 로그에 남길 분류 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequestConstruction(_) | Self::InvalidQuery(_) => "request_construction",
            Self::Forward(_) | Self::Timeout(_) => "forward",
            Self::ResponseRead(_) => "response_read",
            Self::TokenDecode(_) => "token_decode",
            Self::Response(_) => "response",
        }
    }
}
