//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 데이터 구조를 정의합니다.
//!
//! ```text
//! dto/
//! └── users/
//!     ├── request/    # 클라이언트 → 서버
//!     └── response/   # 서버 → 클라이언트
//! ```

pub mod users;
