//! 공통 엔드포인트 핸들러
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/` | 기본 응답 |
//! | `GET` | `/health` | 컴포넌트 메타데이터 |
//! | `GET` | `/config` | 설정값을 로그로 출력 |

use actix_web::{HttpResponse, get, web};
use log::info;
use serde_json::json;

use crate::config::AppConfig;
use crate::core::registry::ComponentRegistry;

#[get("/")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().json(json!({"message": "Hello World"}))
}

/// 헬스체크 핸들러
///
/// 레지스트리의 컴포넌트 메타데이터를 그대로 반환합니다.
/// 컴포넌트를 생성하지 않으므로 데이터베이스가 내려가 있어도 응답합니다.
///
/// ```json
/// {"mysql": [{"host": "127.0.0.1:3306", "status": "up"}]}
/// ```
#[get("/health")]
pub async fn health_check(registry: web::Data<ComponentRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.metadata())
}

/// 설정값 로그 출력 핸들러
///
/// 모든 설정 키/값을 한 줄씩 로그로 남깁니다. `DB_PASSWORD`는 가려집니다.
#[get("/config")]
pub async fn log_config(config: web::Data<AppConfig>) -> HttpResponse {
    for (key, value) in config.entries() {
        info!(key = key.as_str(), value = value.as_str(); "Config value");
    }
    HttpResponse::Ok().json(json!({"msg": "logged config values"}))
}
