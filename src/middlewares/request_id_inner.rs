//! RequestIdMiddleware의 요청/응답 처리 로직
use std::rc::Rc;

use actix_web::body::{BodySize, BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web::Bytes;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use log::warn;
use serde_json::Value;
use uuid::Uuid;

use crate::middlewares::body_logger::{
    REQUEST_ID_BODY_KEY, RESPONSE_REQUEST_ID_HEADER, content_type, drain_response, extract_request_id,
    rebuild_response,
};
use crate::middlewares::context::{RequestId, with_request_id};

/// 실제 요청 ID 처리를 수행하는 서비스
pub struct RequestIdMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let request_id = extract_request_id(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());
        req.extensions_mut().insert(RequestId(request_id.clone()));

        // 다음 서비스 호출까지 스코프 안에 있어야 핸들러에서 ID가 보임
        Box::pin(with_request_id(request_id.clone(), async move {
            let res = service.call(req).await?;
            stamp_response(res, &request_id).await
        }))
    }
}

/// 응답 헤더와 JSON 객체 본문에 요청 ID를 기록합니다.
async fn stamp_response<B>(mut res: ServiceResponse<B>, request_id: &str) -> Result<ServiceResponse<BoxBody>, Error>
where
    B: MessageBody + 'static,
{
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static("x-request-id"), value);
        }
        Err(e) => {
            warn!(header = RESPONSE_REQUEST_ID_HEADER, error:% = e; "Failed to encode request id header");
        }
    }

    let is_json = content_type(res.headers()).is_some_and(|ct| ct.starts_with("application/json"));
    let has_body = !matches!(res.response().body().size(), BodySize::None | BodySize::Sized(0));
    if !is_json || !has_body {
        return Ok(res.map_into_boxed_body());
    }

    let (req, head, bytes) = drain_response(res).await?;
    let body = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(mut map)) => {
            map.insert(REQUEST_ID_BODY_KEY.to_string(), Value::String(request_id.to_string()));
            match serde_json::to_vec(&map) {
                Ok(stamped) => Bytes::from(stamped),
                Err(_) => bytes,
            }
        }
        // 객체가 아니거나 파싱에 실패하면 원본 그대로
        _ => bytes,
    };

    Ok(rebuild_response(req, head, body))
}
