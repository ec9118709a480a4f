//! Users Entity Module
//!
//! `users` 테이블 엔티티와 비밀번호 인코딩 함수를 제공합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{NewUser, encode_password};
//!
//! let new_user = NewUser::new("A", "a@x.com", encode_password("p1"));
//! ```

pub mod user;

pub use user::*;
