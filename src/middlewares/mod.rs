//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//! Spring Boot의 Filter와 유사한 역할을 수행하며, 횡단 관심사(Cross-cutting concerns)를 처리합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 요청 ID 미들웨어 (RequestIdMiddleware)
//! - 요청 헤더의 ID를 사용하거나 UUID v4 생성
//! - 처리 전체를 task-local 요청 ID 스코프 안에서 실행
//! - 응답 헤더 `X-Request-ID`와 JSON 객체 본문의 `request_id` 기록
//!
//! ### 2. 요청 로깅 미들웨어 (RequestLoggerMiddleware)
//! - 요청 본문 버퍼링 후 payload 재주입
//! - 요청/응답 구조화 로그 (민감한 헤더 마스킹)
//!
//! # 실행 순서
//!
//! actix-web은 마지막에 `wrap`한 미들웨어가 가장 바깥에서 실행됩니다.
//!
//! ```text
//! 요청 ─▶ RequestId ─▶ RequestLogger ─▶ Handler
//! 응답 ◀─ RequestId ◀─ RequestLogger ◀─┘
//! ```
//!
//! ```rust,ignore
//! use crate::middlewares::{RequestIdMiddleware, RequestLoggerMiddleware};
//!
//! App::new()
//!     .wrap(RequestLoggerMiddleware::from_config(&config))
//!     .wrap(RequestIdMiddleware)
//! ```

pub mod body_logger;
pub mod context;
pub mod logging_middleware;
pub mod request_id_middleware;
mod logging_inner;
mod request_id_inner;

// 미들웨어 재export
pub use body_logger::{CapturedBody, ParsedBody, RequestBody};
pub use context::{RequestId, current_request_id, with_request_id};
pub use logging_middleware::RequestLoggerMiddleware;
pub use request_id_middleware::RequestIdMiddleware;
