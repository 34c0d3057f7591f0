#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("미들웨어 {middleware} 초기화 실패: {message}")]
    Init {
        middleware: String,
        message: String,
    },

    #[error("미들웨어 설정 변환 실패: {0}")]
    Settings(#[from] serde_json::Error),
}
