//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! JSON 설정 파일 하나를 읽어 [`AppConfig`]로 보관하고, 그 안의 `COMPONENTS`
//! 항목으로 레지스트리를 채웁니다.
//!
//! ## 모듈 구성
//!
//! - [`app_config`] - 설정 파일 로딩, 키 정규화, 기본값
//! - [`component_config`] - 설정 기반 컴포넌트 등록
//!
//! ## 설정 파일 탐색 순서
//!
//! 1. `/etc/config.json`
//! 2. `./config.json`
//! 3. 둘 다 없으면 내장 기본값
//!
//! 파일이 있지만 JSON이 잘못된 경우는 시작 실패입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AppConfig, register_all};
//!
//! let config = AppConfig::load()?;
//! let registry = Arc::new(ComponentRegistry::new());
//! register_all(&registry, &config);
//! ```
//!
//! ## 환경 변수
//!
//! ```bash
//! export PORT="9000"        # SERVER_PORT보다 우선
//! export RUST_LOG="debug"   # 로그 레벨 (기본 info)
//! export PROFILE="dev"      # .env.dev 파일 로딩
//! ```

pub mod app_config;
pub mod component_config;

pub use app_config::*;
pub use component_config::*;
