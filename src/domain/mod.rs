//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 영속 객체 (users 테이블 매핑)
//! └── dto       - 요청/응답 데이터 전송 객체
//!      │
//!      ▼
//! Services → Repositories → MySQL
//! ```
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `@Entity` | [`entities`] | 테이블 행 매핑 |
//! | `@RequestBody` / `@ResponseBody` | [`dto`] | API 계약 정의 |
//! | `@Valid` | `validator` crate | 입력값 길이 검증 |

pub mod entities;
pub mod dto;
