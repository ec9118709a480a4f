//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 레지스트리에 팩토리로 등록되어 첫 요청 시점에 생성됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service: Arc<UserService> = registry.resolve("user_service")?;
//! ```

pub mod users;
