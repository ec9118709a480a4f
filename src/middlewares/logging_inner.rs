//! RequestLoggerMiddleware의 본문 캡처와 로깅 로직
use std::collections::BTreeMap;
use std::rc::Rc;

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::{Error, HttpMessage, web};
use futures_util::future::LocalBoxFuture;
use log::{debug, info};

use crate::middlewares::body_logger::{
    CapturedBody, bytes_to_payload, content_type, drain_response, mask_sensitive_headers, parse_body,
    read_request_body, rebuild_response,
};

/// 실제 로깅을 수행하는 서비스
pub struct RequestLoggerMiddlewareService<S> {
    pub service: Rc<S>,
    pub excluded_paths: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let excluded_paths = self.excluded_paths.clone();

        Box::pin(async move {
            let path = req.path().to_string();
            let should_log = !excluded_paths.iter().any(|excluded| *excluded == path);

            // 읽기에 실패하면 로그 본문은 비우고, 핸들러에는 같은 에러를 그대로 돌려줌
            let captured = match read_request_body(&mut req).await {
                Ok(raw) => {
                    let captured = CapturedBody::new(raw.clone(), content_type(req.headers()));
                    req.set_payload(bytes_to_payload(raw));
                    Some(captured)
                }
                Err(e) => {
                    debug!(error:% = e.error, received = e.partial.len(); "Failed to read request body");
                    req.set_payload(e.into_payload());
                    None
                }
            };

            if should_log {
                let client_ip = req
                    .peer_addr()
                    .map(|addr| addr.ip().to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let query_params = web::Query::<BTreeMap<String, String>>::from_query(req.query_string())
                    .map(web::Query::into_inner)
                    .unwrap_or_default();

                info!(
                    method = req.method().as_str(),
                    path = path.as_str(),
                    "client-ip" = client_ip.as_str(),
                    headers:serde = mask_sensitive_headers(req.headers()),
                    query_params:serde = query_params,
                    body:serde = captured.as_ref().and_then(|captured| captured.parsed.clone());
                    "Incoming request"
                );
            }
            if let Some(captured) = captured {
                req.extensions_mut().insert(captured);
            }

            let res = service.call(req).await?;
            if !should_log {
                return Ok(res.map_into_boxed_body());
            }

            let (req, head, bytes) = drain_response(res).await?;
            let response = parse_body(&bytes, content_type(head.headers()));
            info!(
                status = head.status().as_u16(),
                response:serde = response;
                "Request completed"
            );

            Ok(rebuild_response(req, head, bytes))
        })
    }
}
