//! 요청 ID 미들웨어
//!
//! 요청마다 ID를 정하고, 이후 처리 전체를 그 ID가 바인딩된 컨텍스트 안에서 실행합니다.
//! 응답에는 `X-Request-ID` 헤더를 붙이고, JSON 객체 응답이면 본문에 `request_id`를 넣습니다.
//!
//! 가장 바깥쪽 미들웨어여야 합니다. actix-web은 나중에 `wrap`한 미들웨어를 바깥에 두므로
//! 마지막에 등록합니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(RequestLoggerMiddleware::from_config(&config))
//!     .wrap(RequestIdMiddleware)
//! ```

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;

use crate::middlewares::request_id_inner::RequestIdMiddlewareService;

/// 요청 ID 바인딩 및 응답 스탬핑 미들웨어
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = RequestIdMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
