//! 컴포넌트 서비스 백엔드
//!
//! 지연 초기화 컴포넌트 레지스트리 위에서 동작하는 Actix-web 기반 HTTP 서비스입니다.
//! 모든 요청은 요청 ID 컨텍스트 안에서 처리되고, 요청/응답 본문이 구조화 로그로 남습니다.
//!
//! # Features
//!
//! - **컴포넌트 레지스트리**: 인스턴스/팩토리/지연 등록 3계층, 첫 사용 시 한 번만 생성
//! - **요청 ID 전파**: task-local 컨텍스트, 응답 헤더와 JSON 본문에 기록
//! - **본문 캡처 로깅**: 요청 본문 버퍼링 후 재주입, 민감한 헤더 마스킹
//! - **JSON 로그**: `log` key/value를 필드로 갖는 한 줄 JSON
//! - **MySQL**: sqlx 커넥션 풀, 요청별 트랜잭션
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │ RequestId → RequestLogger│ ← 미들웨어
//! └─────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │  registry.resolve("user_service")
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │      MySQL      │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use component_service_backend::config::{AppConfig, register_all};
//! use component_service_backend::core::registry::ComponentRegistry;
//!
//! let config = AppConfig::load()?;
//! let registry = Arc::new(ComponentRegistry::new());
//! register_all(&registry, &config);
//!
//! // 첫 호출에서 커넥션 풀과 서비스가 생성됩니다.
//! let user_service: Arc<UserService> = registry.resolve("user_service")?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod logging;
pub mod middlewares;
