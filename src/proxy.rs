use async_trait::async_trait;
use hyper::{Request, StatusCode, Uri};
use tracing::{error, info, instrument};
use crate::middleware::forward_request::{remove_hop_headers, ForwardClient};
use crate::middleware::{full, Handler, Response};

/// 체인 끝에서 요청을 백엔드로 전달하는 핸들러
pub struct ProxyHandler {
    client: ForwardClient,
    backend: Uri,
}

impl ProxyHandler {
    pub fn new(client: ForwardClient, backend: Uri) -> Self {
        Self { client, backend }
    }

    fn backend_uri(&self, original: &Uri) -> Result<Uri, hyper::http::Error> {
        let path_and_query = original
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let mut parts = self.backend.clone().into_parts();
        let base = parts
            .path_and_query
            .as_ref()
            .map(|pq| pq.path().trim_end_matches('/').to_string())
            .unwrap_or_default();
        parts.path_and_query = Some(format!("{}{}", base, path_and_query).parse()?);
        Ok(Uri::from_parts(parts)?)
    }
}

#[async_trait]
impl Handler for ProxyHandler {
    #[instrument(skip(self, req), fields(method = %req.method(), path = %req.uri().path()))]
    async fn handle(&self, req: crate::middleware::Request) -> Response {
        let uri = match self.backend_uri(req.uri()) {
            Ok(uri) => uri,
            Err(e) => {
                error!(error = %e, "백엔드 URI 생성 실패");
                return build_error_response(StatusCode::BAD_REQUEST, format!("Failed to build request: {}", e));
            }
        };

        let (mut parts, body) = req.into_parts();
        parts.uri = uri;
        parts.headers.remove(hyper::header::HOST);
        remove_hop_headers(&mut parts.headers);

        info!(backend = %parts.uri, "Proxying request to backend");
        match self.client.send(Request::from_parts(parts, body)).await {
            Ok(forwarded) => {
                let (mut parts, body) = forwarded.into_body();
                remove_hop_headers(&mut parts.headers);
                Response::from_parts(parts, body)
            }
            Err(e) => {
                error!(error = %e, "Backend request failed");
                build_error_response(StatusCode::BAD_GATEWAY, format!("Backend request failed: {}", e))
            }
        }
    }
}

fn build_error_response(status: StatusCode, message: String) -> Response {
    let mut response = Response::new(full(message));
    *response.status_mut() = status;
    response
}
