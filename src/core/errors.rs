//! # Application Error Handling System
//!
//! 백엔드 서비스 전역에서 사용하는 에러 타입을 모아둔 모듈입니다.
//! `thiserror`로 `Error` trait을 구현하고, HTTP 경계에 도달하는 `AppError`는
//! `actix_web::ResponseError`를 구현하여 자동으로 JSON 에러 응답으로 변환됩니다.
//!
//! ## 에러 계층
//!
//! | 타입 | 발생 위치 | 비고 |
//! |------|-----------|------|
//! | [`RegistryError`] | 컴포넌트 레지스트리 | 조회 실패, 팩토리 실패, 등록 불변식 위반 |
//! | [`ConfigError`] | 설정 파일 로딩 | 존재하는 파일의 읽기/파싱 실패 (시작 시 치명적) |
//! | [`AppError`] | 서비스/핸들러 | HTTP 상태 코드로 매핑 |
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패, 본문 누락 |
//! | `ConflictError` | 409 Conflict | 중복 이메일 등 |
//! | `ServiceUnavailable` | 503 Service Unavailable | 레지스트리가 컴포넌트를 제공하지 못함 |
//! | `DatabaseError` | 500 Internal Server Error | 데이터베이스 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 응답 본문은 항상 `{"error": <코드>, "detail": <한 줄 메시지>}` 형태입니다.
//! 여러 줄짜리 메시지는 한 줄로 접어서 내보내고, 원본은 로그에만 남깁니다.

use std::path::PathBuf;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

use crate::utils::string_utils::single_line;

/// 팩토리/정리 콜백이 돌려주는 박싱된 에러
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 컴포넌트 레지스트리 에러
///
/// 해석(resolve) 과정의 각 실패 단계를 구분합니다.
/// `Initialization`만 재시도 가능한 에러이며, 실패한 결과는 캐시되지 않습니다.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// 어느 계층(instance/factory/deferred registrar)에도 이름이 없음
    #[error("Component '{name}' not found. Available components: [{}]", .available.join(", "))]
    NotFound { name: String, available: Vec<String> },

    /// 팩토리 실행 실패
    #[error("Failed to initialize component '{name}': {source}")]
    Initialization {
        name: String,
        #[source]
        source: BoxError,
    },

    /// 지연 등록 함수가 실행됐지만 팩토리를 등록하지 않음
    #[error("Deferred registrar for '{name}' did not register a factory")]
    RegistrationInvariant { name: String },

    /// 저장된 인스턴스가 요청한 타입과 다름
    #[error("Component '{name}' is not of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    /// 팩토리가 자기 자신(직접 또는 간접)을 해석하려 함
    #[error("Circular dependency detected while initializing '{name}'")]
    CircularDependency { name: String },
}

/// 설정 파일 에러
///
/// 파일이 *없는* 경우는 에러가 아닙니다. 다음 후보 경로나 기본값으로 넘어갑니다.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 애플리케이션 전역 에러 타입
///
/// 서비스와 핸들러 계층에서 반환되며, 핸들러가 `Result<HttpResponse, AppError>`를
/// 반환하면 Actix-Web이 [`ResponseError`] 구현을 통해 응답으로 변환합니다.
///
/// ```rust,ignore
/// repo.create(new_user).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400)
    ///
    /// 본문 누락, 필수 필드 누락, 길이 제한 위반 등
    #[error("{0}")]
    ValidationError(String),

    /// 비즈니스 규칙 위반 (409)
    ///
    /// 중복 이메일로 사용자를 생성하려는 경우가 대표적입니다.
    /// 서버 오류가 아닌 클라이언트 오류로 응답됩니다.
    #[error("{0}")]
    ConflictError(String),

    /// 레지스트리에서 필요한 컴포넌트를 얻지 못함 (503)
    #[error("Component unavailable: {0}")]
    ServiceUnavailable(String),

    /// 예상하지 못한 시스템 오류 (500)
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어가는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::ConflictError(_) => "conflict",
            AppError::ServiceUnavailable(_) => "service_unavailable",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 에러를 JSON 응답으로 변환합니다.
    ///
    /// 5xx 에러는 원본 메시지 전체를 로그로 남기고,
    /// 클라이언트에는 개행과 탭을 접은 한 줄 메시지만 전달합니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(error_code = self.code(), status = status.as_u16(); "{}", message);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.code(),
            "detail": single_line(&message),
        }))
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { .. } | RegistryError::Initialization { .. } => {
                AppError::ServiceUnavailable(err.to_string())
            }
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Request body is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("User with this email already exists".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_error_detail_is_single_line() {
        let error = AppError::InternalError("Failed to create user:\n\tboom\n  at line 3".to_string());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "internal_error");
        assert_eq!(json["detail"], "Failed to create user: boom at line 3");
    }

    #[test]
    fn test_registry_not_found_maps_to_service_unavailable() {
        let err = RegistryError::NotFound {
            name: "database".to_string(),
            available: vec!["cache".to_string()],
        };
        let app_error: AppError = err.into();

        assert_eq!(app_error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(app_error.to_string().contains("cache"));
    }

    #[test]
    fn test_registry_invariant_maps_to_internal_error() {
        let err = RegistryError::RegistrationInvariant { name: "database".to_string() };
        let app_error: AppError = err.into();

        assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
