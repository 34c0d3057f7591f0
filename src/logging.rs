use std::io;
use tracing::{info, warn, error, debug, Level, span};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use time::format_description::well_known::Rfc3339;
use crate::settings::{LogFormat, LogOutput, LogSettings};

/// 로깅을 초기화합니다.
///
/// 반환된 가드는 프로세스가 끝날 때까지 유지해야 버퍼된 로그가 유실되지 않습니다.
pub fn init_logging(settings: &LogSettings) -> io::Result<WorkerGuard> {
    let (writer, guard) = match &settings.output {
        LogOutput::Stdout => tracing_appender::non_blocking(io::stdout()),
        LogOutput::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_appender::non_blocking(file)
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(settings.level.into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::new(Rfc3339))
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let result = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        // 테스트 등에서 이미 구독자가 설치된 경우
        debug!(error = %e, "로깅 구독자가 이미 설치됨");
    }

    Ok(guard)
}

/// 요청 한 건에 대한 포워드 처리 기록
#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    pub middleware: String,
    pub method: String,
    pub path: String,
    pub host: String,
    pub target: String,
    pub status_code: u16,
    pub outcome: &'static str,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl RequestLog {
    pub fn new(middleware: &str) -> Self {
        let request_id = uuid::Uuid::new_v4().to_string();
        debug!(request_id = %request_id, middleware = %middleware, "Creating new request log");
        Self {
            request_id,
            middleware: middleware.to_string(),
            method: String::new(),
            path: String::new(),
            host: String::new(),
            target: String::new(),
            status_code: 0,
            outcome: "",
            duration_ms: 0,
            error: None,
        }
    }

    pub fn with_request<B>(&mut self, req: &hyper::Request<B>) {
        self.method = req.method().to_string();
        self.path = req.uri().path().to_string();
        if let Some(host) = req.headers().get(hyper::header::HOST) {
            self.host = host.to_str().unwrap_or_default().to_string();
        }

        debug!(
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            host = %self.host,
            "Received request"
        );
    }

    pub fn with_target(&mut self, target: &hyper::Uri) {
        self.target = target.to_string();
    }

    pub fn with_response(&mut self, status: hyper::StatusCode) {
        self.status_code = status.as_u16();
        debug!(
            request_id = %self.request_id,
            status = %self.status_code,
            "Forward response received"
        );
    }

    pub fn with_outcome(&mut self, outcome: &'static str) {
        self.outcome = outcome;
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        let error_msg = error.to_string();
        debug!(
            request_id = %self.request_id,
            error = %error_msg,
            "Forward request error occurred"
        );
        self.error = Some(error_msg);
    }
}

pub fn log_request(log: &RequestLog) {
    let level = if log.error.is_some() {
        Level::ERROR
    } else if log.status_code >= 400 {
        Level::WARN
    } else {
        Level::INFO
    };

    let span = span!(
        Level::INFO,
        "forward_request",
        request_id = %log.request_id,
        middleware = %log.middleware,
        method = %log.method,
        path = %log.path,
        host = %log.host,
        status = %log.status_code,
        duration_ms = %log.duration_ms
    );
    let _enter = span.enter();

    match level {
        Level::ERROR => error!(
            target_url = %log.target,
            outcome = log.outcome,
            error = ?log.error,
            "Forward request failed"
        ),
        Level::WARN => warn!(
            target_url = %log.target,
            outcome = log.outcome,
            "Forward request rejected"
        ),
        _ => info!(
            target_url = %log.target,
            outcome = log.outcome,
            "Forward request completed"
        ),
    }
}
