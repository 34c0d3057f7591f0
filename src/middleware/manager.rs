use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use super::forward_request::{ForwardClient, ForwardRequest, ForwardRequestConfig};
use super::{Handler, MiddlewareConfig, MiddlewareError, MiddlewareType, Request, Response};

/// 미들웨어 생성 시 주입되는 공유 자원
#[derive(Clone, Default)]
pub struct MiddlewareContext {
    pub client: ForwardClient,
}

impl MiddlewareContext {
    pub fn new(client: ForwardClient) -> Self {
        Self { client }
    }
}

/// 미들웨어 설정으로부터 다음 핸들러를 감싸는 미들웨어 인스턴스를 생성합니다.
pub fn create_middleware(
    ctx: &MiddlewareContext,
    next: Arc<dyn Handler>,
    config: &MiddlewareConfig,
    name: &str,
) -> Result<Arc<dyn Handler>, MiddlewareError> {
    debug!("미들웨어 생성 시작: name={}, type={:?}, settings={:?}", name, config.middleware_type, config.settings);

    match config.middleware_type {
        MiddlewareType::ForwardRequest => {
            let forward_config = ForwardRequestConfig::from_settings(&config.settings)
                .map_err(|e| MiddlewareError::Init {
                    middleware: name.to_string(),
                    message: e.to_string(),
                })?;
            Ok(Arc::new(ForwardRequest::new(ctx.client.clone(), next, &forward_config, name)?))
        }
    }
}

/// 미들웨어 체인
///
/// `order`가 낮은 미들웨어가 바깥쪽에 위치하여 먼저 실행됩니다.
#[derive(Clone)]
pub struct MiddlewareManager {
    head: Arc<dyn Handler>,
    names: Vec<String>,
}

impl MiddlewareManager {
    pub fn new(
        ctx: &MiddlewareContext,
        middleware_configs: &HashMap<String, MiddlewareConfig>,
        terminal: Arc<dyn Handler>,
    ) -> Result<Self, MiddlewareError> {
        // 정렬을 위해 Vec으로 변환
        let mut ordered_configs: Vec<_> = middleware_configs.iter()
            .filter(|(_, config)| config.enabled)
            .collect();
        ordered_configs.sort_by(|(a_name, a), (b_name, b)| {
            a.order.cmp(&b.order).then_with(|| a_name.cmp(b_name))
        });

        // 안쪽부터 감싼다
        let mut head = terminal;
        for (name, config) in ordered_configs.iter().rev() {
            head = create_middleware(ctx, head, config, name)?;
        }

        let names: Vec<String> = ordered_configs.into_iter()
            .map(|(name, _)| name.clone())
            .collect();
        info!(middlewares = ?names, "미들웨어 체인 구성 완료");

        Ok(Self { head, names })
    }

    /// 실행 순서대로 정렬된 미들웨어 이름
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub async fn handle(&self, req: Request) -> Response {
        self.head.handle(req).await
    }
}
