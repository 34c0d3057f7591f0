#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use bytes::Bytes;
use forward_request::middleware::{full, Handler, Request, Response};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{HeaderMap, Method, Uri};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// 테스트 서버가 받은 요청
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// 고정 응답을 돌려주는 테스트 업스트림 서버
pub struct Upstream {
    pub url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl Upstream {
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

pub async fn start_upstream<F>(respond: F) -> Upstream
where
    F: Fn(&Captured) -> hyper::Response<Full<Bytes>> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let respond = Arc::new(respond);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = requests.clone();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let respond = respond.clone();
            let captured = captured.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<Incoming>| {
                    let respond = respond.clone();
                    let captured = captured.clone();
                    async move {
                        let (parts, body) = req.into_parts();
                        let body = body.collect().await?.to_bytes();
                        let request = Captured {
                            method: parts.method,
                            uri: parts.uri,
                            headers: parts.headers,
                            body,
                        };
                        let response = respond(&request);
                        captured.lock().unwrap().push(request);
                        Ok::<_, hyper::Error>(response)
                    }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    Upstream {
        url: format!("http://{}/verify", addr),
        requests,
    }
}

/// 연결은 받지만 응답하지 않는 서버
pub async fn start_silent_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    format!("http://{}/verify", addr)
}

pub fn response(status: u16, headers: &[(&str, &str)], body: &'static str) -> hyper::Response<Full<Bytes>> {
    let mut builder = hyper::Response::builder().status(status);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Full::new(Bytes::from_static(body.as_bytes()))).unwrap()
}

/// 다음 핸들러 호출을 기록하는 핸들러
#[derive(Default)]
pub struct RecordingHandler {
    calls: AtomicUsize,
    seen: Mutex<Option<Captured>>,
}

impl RecordingHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Option<Captured> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Handler for RecordingHandler {
    async fn handle(&self, req: Request) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (parts, body) = req.into_parts();
        let body = body.collect().await.map(|c| c.to_bytes()).unwrap_or_default();
        *self.seen.lock().unwrap() = Some(Captured {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        });

        let mut response = Response::new(full("from next"));
        response.headers_mut().insert("x-next", "1".parse().unwrap());
        response
    }
}

pub fn request(method: Method, uri: &str, headers: &[(&str, &str)], body: &'static str) -> Request {
    let mut builder = hyper::Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(full(body)).unwrap()
}

pub async fn read_body(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}
