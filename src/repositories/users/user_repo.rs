//! # 사용자 리포지토리 구현
//!
//! `users` 테이블에 대한 데이터 액세스 계층입니다.
//!
//! ## 특징
//!
//! - **trait 기반**: 서비스는 [`UserRepository`] trait에만 의존합니다.
//! - **요청별 연결**: 매 호출마다 풀에서 연결을 체크아웃하고 끝나면 반환합니다.
//! - **트랜잭션 생성**: 중복 확인과 INSERT를 한 트랜잭션에서 수행하고,
//!   에러 경로에서는 commit 없이 drop되어 rollback됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::users::{NewUser, User};

/// 중복 이메일 메시지
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";

const SELECT_USER_COLUMNS: &str =
    "SELECT id, name, email, password, created_at, updated_at, is_active, last_login, phone, address FROM users";

/// 사용자 데이터 액세스 인터페이스
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 사용자를 저장하고 할당된 id를 반환합니다.
    ///
    /// 같은 이메일이 이미 있으면 `AppError::ConflictError`를 반환합니다.
    async fn create(&self, user: NewUser) -> AppResult<i64>;

    /// id 오름차순으로 모든 사용자를 반환합니다.
    async fn find_all(&self) -> AppResult<Vec<User>>;
}

/// MySQL 기반 사용자 리포지토리
pub struct MySqlUserRepository {
    db: Arc<Database>,
}

impl MySqlUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: NewUser) -> AppResult<i64> {
        let mut tx = self.db.begin().await?;

        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = ? LIMIT 1")
            .bind(&user.email)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(AppError::ConflictError(DUPLICATE_EMAIL_MESSAGE.to_string()));
        }

        let result = sqlx::query(
            "INSERT INTO users (name, email, password, created_at, updated_at, is_active, phone, address) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .bind(user.created_at)
        .bind(user.is_active)
        .bind(&user.phone)
        .bind(&user.address)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            // 동시 요청이 중복 확인을 함께 통과한 경우 unique 인덱스가 막아줌
            if is_unique_violation(&e) {
                AppError::ConflictError(DUPLICATE_EMAIL_MESSAGE.to_string())
            } else {
                AppError::from(e)
            }
        })?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| AppError::InternalError(format!("Invalid user id: {}", e)))?;

        tx.commit().await?;
        debug!(user_id = id; "User row inserted");
        Ok(id)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!("{} ORDER BY id", SELECT_USER_COLUMNS))
            .fetch_all(self.db.pool())
            .await?;
        Ok(users)
    }
}
