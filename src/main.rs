use forward_request::logging::init_logging;
use forward_request::server::ServerManager;
use forward_request::settings::Settings;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    let _guard = match init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("로깅 초기화 실패: {}", e);
            std::process::exit(1);
        }
    };

    let server = match ServerManager::new(settings) {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "서버 구성 실패");
            std::process::exit(1);
        }
    };

    info!(port = server.config.server.http_port, "Forward request proxy starting");
    if let Err(e) = server.run().await {
        error!(error = %e, "서버 실행 실패");
        std::process::exit(1);
    }
}
