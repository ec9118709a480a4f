//! # 사용자 관련 요청 DTO 모듈
//!
//! 요청 본문은 로깅 미들웨어가 미리 파싱해둔 값([`RequestBody`](crate::middlewares::RequestBody))에서
//! 꺼내 DTO로 변환합니다. 검증 실패는 400 Bad Request로 응답됩니다.

pub mod create_user_request;

pub use create_user_request::CreateUserRequest;
