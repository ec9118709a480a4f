//! # 사용자 관리 서비스 구현
//!
//! 사용자 생성과 목록 조회 비즈니스 로직을 담당합니다.
//!
//! ```text
//! Handler ──(요청 본문 JSON)──▶ UserService ──(NewUser)──▶ UserRepository ──▶ MySQL
//! ```
//!
//! ## 에러 매핑
//!
//! | 상황 | 에러 | HTTP |
//! |------|------|------|
//! | 본문 없음 / 빈 객체 | `ValidationError("Request body is required")` | 400 |
//! | 필수 필드 누락 | `ValidationError("name, email, and password are required")` | 400 |
//! | 이메일 중복 | `ConflictError("User with this email already exists")` | 409 |
//! | 그 외 | `InternalError("Failed to create user: ...")` | 500 |

use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use serde_json::Value;
use validator::Validate;

use crate::core::errors::{AppError, AppResult, RegistryError};
use crate::core::registry::ComponentRegistry;
use crate::db::{DATABASE_COMPONENT, Database};
use crate::domain::dto::users::request::CreateUserRequest;
use crate::domain::dto::users::response::{CreateUserResponse, UserListResponse, UserResponse};
use crate::domain::entities::users::{NewUser, encode_password};
use crate::repositories::users::{MySqlUserRepository, UserRepository};
use crate::utils::string_utils::is_blank;

/// 레지스트리에 등록되는 컴포넌트 이름
pub const USER_SERVICE_COMPONENT: &str = "user_service";

/// 사용자 관리 비즈니스 로직 서비스
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// 레지스트리의 `"database"` 컴포넌트로 MySQL 리포지토리를 구성합니다.
    ///
    /// `"user_service"` 팩토리에서 호출되므로, 첫 사용 시점에 커넥션 풀도 함께 생성됩니다.
    pub fn from_registry(registry: &ComponentRegistry) -> Result<Self, RegistryError> {
        let database: Arc<Database> = registry.resolve(DATABASE_COMPONENT)?;
        Ok(Self::new(Arc::new(MySqlUserRepository::new(database))))
    }

    /// 새 사용자를 생성합니다.
    ///
    /// `body`는 로깅 미들웨어가 파싱해둔 요청 본문입니다.
    pub async fn create_user(&self, body: Option<&Value>) -> AppResult<CreateUserResponse> {
        let start_time = Instant::now();
        info!("Creating user");

        let result = self.create_user_inner(body).await;
        match &result {
            Ok(response) => info!(
                user_id = response.user_id,
                elapsed_ms = start_time.elapsed().as_millis() as u64;
                "User created successfully"
            ),
            Err(e) => error!(error:% = e; "Failed to create user"),
        }

        result.map_err(|e| match e {
            AppError::ValidationError(_) | AppError::ConflictError(_) | AppError::ServiceUnavailable(_) => e,
            other => AppError::InternalError(format!("Failed to create user: {}", other)),
        })
    }

    async fn create_user_inner(&self, body: Option<&Value>) -> AppResult<CreateUserResponse> {
        let body = match body {
            None | Some(Value::Null) => return Err(body_required()),
            Some(Value::Object(map)) if map.is_empty() => return Err(body_required()),
            Some(value @ Value::Object(_)) => value,
            Some(_) => {
                return Err(AppError::ValidationError("Request body must be a JSON object".to_string()));
            }
        };

        let request: CreateUserRequest = serde_json::from_value(body.clone())
            .map_err(|e| AppError::ValidationError(format!("Invalid request body: {}", e)))?;

        let (Some(name), Some(email), Some(password)) = (&request.name, &request.email, &request.password) else {
            return Err(fields_required());
        };
        if [name, email, password].iter().any(|field| is_blank(Some(field.as_str()))) {
            return Err(fields_required());
        }
        request.validate()?;

        let mut new_user = NewUser::new(name.as_str(), email.as_str(), encode_password(password));
        new_user.phone = request.phone;
        new_user.address = request.address;
        new_user.is_active = request.is_active;

        let user_id = self.user_repo.create(new_user).await?;
        Ok(CreateUserResponse::created(user_id))
    }

    /// 모든 사용자를 조회합니다.
    pub async fn get_all_users(&self) -> AppResult<UserListResponse> {
        info!("Getting all users");

        let users = self.user_repo.find_all().await.map_err(|e| {
            error!(error:% = e; "Failed to get all users");
            AppError::InternalError(format!("Failed to get all users: {}", e))
        })?;

        Ok(UserListResponse {
            users: users.into_iter().map(UserResponse::from).collect(),
        })
    }
}

fn body_required() -> AppError {
    AppError::ValidationError("Request body is required".to_string())
}

fn fields_required() -> AppError {
    AppError::ValidationError("name, email, and password are required".to_string())
}
