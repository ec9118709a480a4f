//! 사용자 생성 요청 DTO
//!
//! `POST /users/create` 본문을 표현합니다.
//! 필수 필드(`name`, `email`, `password`)의 존재 여부는 서비스 계층에서 한 번에 확인하고,
//! 여기서는 컬럼 길이 제한만 검증합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// 새로운 사용자 계정 생성을 위한 요청 DTO
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "address must be at most 500 characters"))]
    pub address: Option<String>,

    /// 기본값 `true`
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"name":"A","email":"a@x.com","password":"p1"}"#).unwrap();

        assert_eq!(request.name.as_deref(), Some("A"));
        assert!(request.is_active);
        assert_eq!(request.phone, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_length_limits() {
        let request = CreateUserRequest {
            phone: Some("0".repeat(21)),
            ..CreateUserRequest::default()
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }
}
