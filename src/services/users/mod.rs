//! 사용자 관리 서비스 모듈
//!
//! 사용자 등록과 목록 조회를 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let response = user_service.create_user(body.as_json()).await?;
//! ```

pub mod user_service;

pub use user_service::{USER_SERVICE_COMPONENT, UserService};
