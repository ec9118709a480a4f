//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 한 줄 접기, 문자 단위 잘라내기, 선택 필드 정리

pub mod string_utils;
