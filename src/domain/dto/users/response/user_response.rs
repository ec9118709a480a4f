use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::User;

/// 사용자 응답 DTO (비밀번호 제외)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub is_active: bool,
    pub last_login: Option<NaiveDateTime>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            created_at,
            updated_at,
            is_active,
            last_login,
            phone,
            address,
            ..
        } = user;

        Self {
            id,
            name,
            email,
            created_at,
            updated_at,
            is_active,
            last_login,
            phone,
            address,
        }
    }
}

/// 사용자 생성 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub message: String,
    pub user_id: i64,
}

impl CreateUserResponse {
    pub fn created(user_id: i64) -> Self {
        Self {
            message: "User created successfully".to_string(),
            user_id,
        }
    }
}

/// 사용자 목록 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}
