//! API 라우트 설정 모듈
//!
//! 핸들러들을 경로별로 묶어 애플리케이션에 등록합니다.
//!
//! # Routes
//!
//! - `GET /` - 기본 응답
//! - `GET /health` - 컴포넌트 상태
//! - `GET /config` - 설정값 로그 출력
//! - `POST /users/create` - 사용자 생성
//! - `GET /users` - 사용자 목록
//!
//! 핸들러는 `web::Data<ComponentRegistry>`와 `web::Data<AppConfig>`를 필요로 합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::from(registry.clone()))
//!     .app_data(web::Data::new(config.clone()))
//!     .configure(configure_all_routes);
//! ```

use actix_web::web;
use log::info;

use crate::handlers;

/// [`configure_all_routes`]가 등록하는 (메서드, 경로) 목록
pub const ROUTES: [(&str, &str); 5] = [
    ("GET", "/"),
    ("GET", "/health"),
    ("GET", "/config"),
    ("POST", "/users/create"),
    ("GET", "/users"),
];

/// 등록된 라우트를 시작 로그로 남깁니다
pub fn log_all_routes() {
    for (method, path) in ROUTES {
        info!(method = method, path = path; "Route registered");
    }
}

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::common::hello)
        .service(handlers::common::health_check)
        .service(handlers::common::log_config);

    configure_user_routes(cfg);
}

/// 사용자 관련 라우트를 설정합니다
///
/// ```bash
/// curl -X POST http://localhost:8080/users/create \
///   -H "Content-Type: application/json" \
///   -d '{"name":"A","email":"a@x.com","password":"p1"}'
///
/// curl http://localhost:8080/users
/// ```
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(handlers::users::create_user)
            .service(handlers::users::get_all_users),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::body::MessageBody;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::config::AppConfig;
    use crate::core::registry::{ComponentEndpoint, ComponentRegistry};
    use crate::middlewares::{RequestIdMiddleware, RequestLoggerMiddleware};
    use crate::repositories::users::user_repo::memory::InMemoryUserRepository;
    use crate::services::users::{USER_SERVICE_COMPONENT, UserService};

    fn registry_with_memory_users() -> Arc<ComponentRegistry> {
        let registry = Arc::new(ComponentRegistry::new());
        registry.set_metadata("mysql", vec![ComponentEndpoint::new("127.0.0.1:3306", "up")]);
        registry.register_instance(
            USER_SERVICE_COMPONENT,
            Arc::new(UserService::new(Arc::new(InMemoryUserRepository::default()))),
            None,
        );
        registry
    }

    async fn app(
        registry: Arc<ComponentRegistry>,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
        let config = AppConfig::default();
        test::init_service(
            App::new()
                .app_data(web::Data::from(registry))
                .app_data(web::Data::new(config.clone()))
                .wrap(RequestLoggerMiddleware::from_config(&config))
                .wrap(RequestIdMiddleware)
                .configure(configure_all_routes),
        )
        .await
    }

    fn create_request(body: Value) -> actix_http::Request {
        test::TestRequest::post()
            .uri("/users/create")
            .set_json(body)
            .to_request()
    }

    #[actix_web::test]
    async fn test_listed_routes_are_registered() {
        let app = app(registry_with_memory_users()).await;

        for (method, path) in ROUTES {
            let req = match method {
                "POST" => test::TestRequest::post(),
                _ => test::TestRequest::get(),
            };
            let res = test::call_service(&app, req.uri(path).to_request()).await;

            assert_ne!(res.status(), StatusCode::NOT_FOUND, "{method} {path}");
        }
    }

    #[actix_web::test]
    async fn test_hello_is_stamped_with_request_id() {
        let app = app(registry_with_memory_users()).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let header_id = res.headers().get("X-Request-ID").unwrap().to_str().unwrap().to_string();
        let body: Value = test::read_body_json(res).await;

        assert_eq!(body["message"], "Hello World");
        assert_eq!(body["request_id"], header_id);
    }

    #[actix_web::test]
    async fn test_create_user_then_duplicate() {
        let app = app(registry_with_memory_users()).await;
        let payload = json!({"name": "A", "email": "a@x.com", "password": "p1"});

        let first = test::call_service(&app, create_request(payload.clone())).await;
        assert_eq!(first.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(first).await;
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["user_id"], 1);

        let second = test::call_service(&app, create_request(payload)).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(second).await;
        assert!(body["detail"].as_str().unwrap().contains("already exists"));
        assert!(body["request_id"].is_string());
    }

    #[actix_web::test]
    async fn test_create_user_requires_fields() {
        let app = app(registry_with_memory_users()).await;

        let res = test::call_service(&app, create_request(json!({"name": "A"}))).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "name, email, and password are required");
    }

    #[actix_web::test]
    async fn test_create_user_with_empty_body() {
        let app = app(registry_with_memory_users()).await;

        let req = test::TestRequest::post().uri("/users/create").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["detail"], "Request body is required");
    }

    #[actix_web::test]
    async fn test_list_users_after_create() {
        let app = app(registry_with_memory_users()).await;
        test::call_service(
            &app,
            create_request(json!({"name": "A", "email": "a@x.com", "password": "p1", "address": "Seoul"})),
        )
        .await;

        let req = test::TestRequest::get().uri("/users").insert_header(("x-request-id", "abc-123")).to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.headers().get("X-Request-ID").unwrap(), "abc-123");
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["request_id"], "abc-123");
        assert_eq!(body["users"][0]["email"], "a@x.com");
        assert_eq!(body["users"][0]["address"], "Seoul");
        assert!(body["users"][0].get("password").is_none());
    }

    #[actix_web::test]
    async fn test_health_returns_metadata() {
        let app = app(registry_with_memory_users()).await;

        let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;

        assert_eq!(body["mysql"], json!([{"host": "127.0.0.1:3306", "status": "up"}]));
    }

    #[actix_web::test]
    async fn test_config_endpoint() {
        let app = app(registry_with_memory_users()).await;

        let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/config").to_request()).await;

        assert_eq!(body["msg"], "logged config values");
    }

    #[actix_web::test]
    async fn test_missing_database_is_service_unavailable() {
        let app = app(Arc::new(ComponentRegistry::new())).await;

        let req = test::TestRequest::get().uri("/users").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
