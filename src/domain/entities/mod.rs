//! # Domain Entities Module
//!
//! 데이터베이스 테이블과 1:1로 대응되는 엔티티를 정의합니다.
//! 모든 엔티티는 `sqlx::FromRow`로 행을 읽고 `serde`로 직렬화됩니다.

pub mod users;
