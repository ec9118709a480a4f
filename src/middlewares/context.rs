//! 요청 단위 컨텍스트
//!
//! 현재 요청의 ID를 Tokio task-local 슬롯에 보관합니다.
//! 슬롯은 [`with_request_id`]로 감싼 future 안에서만 보이고, 동시에 처리되는
//! 다른 요청과 섞이지 않습니다.
//!
//! `tokio::spawn`이나 `spawn_blocking`으로 넘긴 작업에는 상속되지 않으므로,
//! 필요하면 [`current_request_id`]로 꺼내서 다시 [`with_request_id`]로 감싸야 합니다.

use std::future::{Future, Ready, ready};

use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

tokio::task_local! {
    static REQUEST_ID: String;
}

/// `future`가 실행되는 동안 `request_id`를 현재 요청 ID로 설정합니다.
pub async fn with_request_id<F>(request_id: String, future: F) -> F::Output
where
    F: Future,
{
    REQUEST_ID.scope(request_id, future).await
}

/// 현재 요청 ID. 요청 밖에서 호출되면 빈 문자열입니다.
pub fn current_request_id() -> String {
    REQUEST_ID.try_with(Clone::clone).unwrap_or_default()
}

/// 핸들러에서 요청 ID를 받는 추출기
///
/// 요청 ID 미들웨어가 extensions에 저장한 값을 우선 사용하고,
/// 없으면 task-local 값을 사용합니다.
///
/// # Examples
///
/// ```rust,ignore
/// async fn handler(request_id: RequestId) -> HttpResponse {
///     HttpResponse::Ok().body(request_id.to_string())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId(current_request_id()));
        ready(Ok(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[tokio::test]
    async fn test_request_id_visible_inside_scope() {
        let observed = with_request_id("req-1".to_string(), async { current_request_id() }).await;

        assert_eq!(observed, "req-1");
    }

    #[tokio::test]
    async fn test_request_id_empty_outside_scope() {
        assert_eq!(current_request_id(), "");
    }

    #[tokio::test]
    async fn test_concurrent_scopes_do_not_interfere() {
        let first = with_request_id("a".to_string(), async {
            tokio::task::yield_now().await;
            current_request_id()
        });
        let second = with_request_id("b".to_string(), async {
            tokio::task::yield_now().await;
            current_request_id()
        });

        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, "a");
        assert_eq!(second, "b");
    }

    #[tokio::test]
    async fn test_nested_scope_restores_outer_value() {
        let (inner, outer) = with_request_id("outer".to_string(), async {
            let inner = with_request_id("inner".to_string(), async { current_request_id() }).await;
            (inner, current_request_id())
        })
        .await;

        assert_eq!(inner, "inner");
        assert_eq!(outer, "outer");
    }

    #[actix_web::test]
    async fn test_extractor_prefers_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(RequestId("from-ext".to_string()));

        let request_id = with_request_id("from-task".to_string(), async {
            RequestId::extract(&req).await.unwrap()
        })
        .await;

        assert_eq!(request_id.as_str(), "from-ext");
    }
}
