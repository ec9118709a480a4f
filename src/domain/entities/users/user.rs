//! User Entity Implementation
//!
//! `users` 테이블 한 행을 표현하는 엔티티입니다.
//! 테이블은 애플리케이션 시작 전에 `sql/users.sql` DDL로 미리 만들어져 있어야 합니다.
//!
//! # 비밀번호 저장 방식
//!
//! 비밀번호는 **base64로 인코딩만** 되어 저장됩니다. 이는 해시가 아니며 누구나 복원할 수 있습니다.
//! 기존 데이터와의 호환을 위해 그대로 유지하고 있으며, 운영 환경에서는 bcrypt/argon2 같은
//! 솔트 해시로 교체해야 합니다.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// AUTO_INCREMENT 기본 키
    pub id: i64,
    pub name: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// base64 인코딩된 비밀번호 (해시 아님)
    pub password: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub is_active: bool,
    pub last_login: Option<NaiveDateTime>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// 아직 저장되지 않은 사용자
///
/// `id`는 저장 시 데이터베이스가 할당합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl NewUser {
    /// 필수 필드로 새 사용자를 만듭니다. `password`는 이미 인코딩된 값이어야 합니다.
    pub fn new(name: impl Into<String>, email: impl Into<String>, encoded_password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: encoded_password.into(),
            phone: None,
            address: None,
            is_active: true,
            created_at: Local::now().naive_local(),
        }
    }

    /// 저장 후 할당된 `id`로 엔티티를 완성합니다.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            created_at: self.created_at,
            updated_at: self.created_at,
            is_active: self.is_active,
            last_login: None,
            phone: self.phone,
            address: self.address,
        }
    }
}

/// 비밀번호를 base64로 인코딩합니다. 해시가 아닙니다.
pub fn encode_password(password: &str) -> String {
    STANDARD.encode(password.as_bytes())
}

/// [`encode_password`]의 역변환
pub fn decode_password(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}
