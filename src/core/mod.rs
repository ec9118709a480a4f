//! # Core Framework Module
//!
//! 서비스 전반에서 공유하는 핵심 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 지연 초기화 컴포넌트 레지스트리
//! - **ComponentRegistry**: 이름 기반 instance / factory / deferred registrar 3계층 컨테이너
//! - **지연 생성**: 첫 `resolve` 시점에 팩토리 실행, 결과 캐싱
//! - **메타데이터**: `/health`에 노출되는 `{host, status}` 목록
//! - **정리 콜백**: 종료 시 한 번씩 실행되는 비동기 정리 함수
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: HTTP 응답으로 변환되는 애플리케이션 에러
//! - **RegistryError / ConfigError**: 레지스트리, 설정 로딩 단계의 에러
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 프레임워크 |
//! |--------|---------------|
//! | `ApplicationContext` | `ComponentRegistry` |
//! | `@Lazy` Bean | `register_factory` |
//! | `BeanDefinitionRegistryPostProcessor` | `register_deferred` |
//! | `@PreDestroy` | cleanup 콜백 |
//! | `@ExceptionHandler` | `AppError::error_response()` |

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
