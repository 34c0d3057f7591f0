use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use crate::middleware::{incoming, MiddlewareManager, Response};
use super::Result;

/// 연결 단위 요청 처리기
///
/// 수신 요청을 파이프라인 바디로 변환하여 미들웨어 체인에 넘깁니다.
pub struct RequestHandler {
    middleware_manager: MiddlewareManager,
}

impl RequestHandler {
    pub fn new(middleware_manager: MiddlewareManager) -> Self {
        Self { middleware_manager }
    }

    pub async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> std::result::Result<Response, std::convert::Infallible> {
        let (parts, body) = req.into_parts();
        let req = Request::from_parts(parts, incoming(body));
        Ok(self.middleware_manager.handle(req).await)
    }

    pub async fn handle_connection<I>(&self, io: I) -> Result<()>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(|req| self.handle_request(req)),
            )
            .await?;
        Ok(())
    }
}
