//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring Framework의 Controller 레이어와 동일한 역할을 수행합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Middlewares - 요청 ID, 본문 캡처/로깅
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   ComponentRegistry - 서비스 지연 생성
//! ├─────────────────────────────────────────────┤
//!   Services / Repositories / MySQL
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - [`common`] - `/`, `/health`, `/config`
//! - [`users`] - 사용자 생성/조회

pub mod common;
pub mod users;
