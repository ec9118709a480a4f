//! # 사용자 관련 응답 DTO 모듈
//!
//! 저장된 비밀번호 인코딩 값은 응답에 포함하지 않습니다.

pub mod user_response;

pub use user_response::*;
