use super::{Request, Response};
use async_trait::async_trait;

/// 요청 처리기
///
/// 체인의 각 단계는 요청을 받아 응답을 반환합니다. 다음 단계로 넘길지,
/// 여기서 응답을 확정할지는 구현체가 결정합니다.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, req: Request) -> Response;
}

/// 미들웨어 트레이트
///
/// 다음 핸들러를 감싸는 핸들러입니다. 생성 시점에 다음 핸들러를 주입받습니다.
pub trait Middleware: Handler {
    /// 미들웨어 인스턴스 이름을 반환합니다.
    fn name(&self) -> &str;
}
