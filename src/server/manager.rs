use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use crate::middleware::forward_request::ForwardClient;
use crate::middleware::{MiddlewareContext, MiddlewareManager};
use crate::proxy::ProxyHandler;
use crate::settings::Settings;
use super::{handler::RequestHandler, listener::ServerListener, Result};

pub struct ServerManager {
    pub config: Settings,
    handler: Arc<RequestHandler>,
}

impl ServerManager {
    /// 설정으로부터 클라이언트, 미들웨어 체인, 요청 처리기를 구성합니다.
    pub fn new(config: Settings) -> Result<Self> {
        // 모든 요청이 공유하는 클라이언트
        let client = ForwardClient::new(config.client.timeout());
        let backend = config.backend.uri()?;

        let terminal = Arc::new(ProxyHandler::new(client.clone(), backend));
        let ctx = MiddlewareContext::new(client);
        let middleware_manager = MiddlewareManager::new(&ctx, &config.middlewares, terminal)?;

        Ok(Self {
            config,
            handler: Arc::new(RequestHandler::new(middleware_manager)),
        })
    }

    pub fn handler(&self) -> Arc<RequestHandler> {
        self.handler.clone()
    }

    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.http_port));
        let listener = ServerListener::new(addr).await?;

        info!(
            backend = %self.config.backend.url,
            timeout_secs = self.config.client.timeout_secs,
            "서버 시작"
        );
        listener.run(self.handler).await
    }
}
