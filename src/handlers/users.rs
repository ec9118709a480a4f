//! # User Management HTTP Handlers
//!
//! 사용자 관리와 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/users/create` | 새 사용자 생성 | 201 Created |
//! | `GET` | `/users` | 사용자 목록 조회 | 200 OK |
//!
//! ## 서비스 획득
//!
//! 핸들러는 요청마다 레지스트리에서 `"user_service"`를 해석합니다.
//! 첫 요청에서만 서비스와 커넥션 풀이 생성되고, 이후에는 캐시된 인스턴스를 사용합니다.
//! 데이터베이스 컴포넌트가 등록되지 않았다면 503을 반환합니다.
//!
//! ## 에러 응답
//!
//! ```json
//! {"error": "conflict", "detail": "User with this email already exists"}
//! ```

use std::sync::Arc;

use actix_web::{HttpResponse, get, post, web};

use crate::core::errors::AppError;
use crate::core::registry::ComponentRegistry;
use crate::middlewares::RequestBody;
use crate::services::users::{USER_SERVICE_COMPONENT, UserService};

fn user_service(registry: &ComponentRegistry) -> Result<Arc<UserService>, AppError> {
    Ok(registry.resolve::<UserService>(USER_SERVICE_COMPONENT)?)
}

/// 사용자 생성 핸들러
///
/// 요청 본문은 로깅 미들웨어가 캡처한 JSON을 사용합니다.
///
/// # 요청 본문
///
/// ```json
/// {
///   "name": "A",
///   "email": "a@x.com",
///   "password": "p1",
///   "phone": "010-0000-0000",
///   "address": "Seoul",
///   "is_active": true
/// }
/// ```
///
/// # 응답
///
/// ## 성공 (201 Created)
/// ```json
/// {"message": "User created successfully", "user_id": 1, "request_id": "..."}
/// ```
///
/// ## 실패 사례
///
/// - 본문 없음, 필수 필드 누락 → 400
/// - 이메일 중복 → 409
///
/// # 사용 예제
///
/// ```bash
/// curl -X POST http://localhost:8080/users/create \
///   -H "Content-Type: application/json" \
///   -d '{"name":"A","email":"a@x.com","password":"p1"}'
/// ```
#[post("/create")]
pub async fn create_user(
    registry: web::Data<ComponentRegistry>,
    body: RequestBody,
) -> Result<HttpResponse, AppError> {
    let service = user_service(&registry)?;
    let response = service.create_user(body.as_json()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 사용자 목록 조회 핸들러
///
/// 비밀번호 필드는 응답에 포함되지 않습니다.
#[get("")]
pub async fn get_all_users(registry: web::Data<ComponentRegistry>) -> Result<HttpResponse, AppError> {
    let service = user_service(&registry)?;
    let users = service.get_all_users().await?;

    Ok(HttpResponse::Ok().json(users))
}
