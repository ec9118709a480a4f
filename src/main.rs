//! 컴포넌트 서비스 메인 애플리케이션
//!
//! 설정을 읽고 컴포넌트를 등록한 뒤 Actix-web HTTP 서버를 구동합니다.
//! 데이터베이스 연결은 첫 요청에서 만들어지며, 서버가 멈추면 정리 콜백을 실행합니다.

use std::process;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use log::{error, info};

use component_service_backend::config::{AppConfig, register_all};
use component_service_backend::core::registry::ComponentRegistry;
use component_service_backend::logging::init_logging;
use component_service_backend::middlewares::{RequestIdMiddleware, RequestLoggerMiddleware};
use component_service_backend::routes::{configure_all_routes, log_all_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error:% = e; "Failed to load config");
            process::exit(1);
        }
    };
    info!(app_name = config.app_name.as_str(), env = config.env.as_str(); "Starting service");

    // 컴포넌트 등록 (연결은 아직 열지 않음)
    let registry = Arc::new(ComponentRegistry::new());
    register_all(&registry, &config);

    let result = start_http_server(config, registry.clone()).await;

    registry.shutdown().await;
    result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 요청 ID 미들웨어가 가장 바깥, 로깅 미들웨어가 그 안쪽에서 실행됩니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(config: AppConfig, registry: Arc<ComponentRegistry>) -> std::io::Result<()> {
    let host = config.server_host.clone();
    let port = config.bind_port();

    log_all_routes();
    info!(
        host = host.as_str(),
        port = port,
        configured_port = config.server_port;
        "Server running on port {}", port
    );
    info!("📍 Health check: http://{}:{}/health", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(registry.clone()))
            .app_data(web::Data::new(config.clone()))
            .wrap(RequestLoggerMiddleware::from_config(&config))
            .wrap(RequestIdMiddleware)
            .configure(configure_all_routes)
    })
    .bind((host.as_str(), port))?
    .workers(4) // 워커 스레드 수
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 반환값으로만 확인
    let _ = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod"),
        "dev" => dotenv::from_filename(".env.dev"),
        _ => dotenv(),
    };
}
