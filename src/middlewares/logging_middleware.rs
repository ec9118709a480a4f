//! 요청/응답 로깅 미들웨어
//!
//! 요청 본문을 한 번 읽어 버퍼링한 뒤 핸들러가 다시 읽을 수 있도록 payload를 되돌려 놓고,
//! 요청과 응답을 구조화 로그로 남깁니다. 민감한 헤더는 가려집니다.
//!
//! 로그 제외 경로(`LOG_EXCLUDED_PATHS`, 기본 `/health`)도 본문 캡처는 동일하게 수행합니다.

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;

use crate::config::AppConfig;
use crate::middlewares::logging_inner::RequestLoggerMiddlewareService;

/// 요청/응답 로깅 미들웨어
#[derive(Debug, Clone)]
pub struct RequestLoggerMiddleware {
    /// 로그를 남기지 않을 경로 (정확히 일치)
    excluded_paths: Rc<Vec<String>>,
}

impl RequestLoggerMiddleware {
    pub fn new(excluded_paths: Vec<String>) -> Self {
        Self {
            excluded_paths: Rc::new(excluded_paths),
        }
    }

    /// 설정의 `LOG_EXCLUDED_PATHS`를 사용합니다.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.log_excluded_paths.clone())
    }
}

impl Default for RequestLoggerMiddleware {
    fn default() -> Self {
        Self::new(vec!["/health".to_string()])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = RequestLoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddlewareService {
            service: Rc::new(service),
            excluded_paths: self.excluded_paths.clone(),
        }))
    }
}
