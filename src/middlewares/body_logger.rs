//! 요청/응답 본문 캡처 유틸리티
//!
//! 두 미들웨어(요청 ID, 요청 로깅)가 공유하는 본문 읽기, 파싱, 헤더 마스킹 함수와
//! 캡처된 본문을 핸들러에서 다시 꺼내는 [`RequestBody`] 추출기를 제공합니다.
//!
//! # 본문 파싱 규칙
//!
//! | 조건 | 결과 |
//! |------|------|
//! | 빈 본문 | `None` |
//! | `application/json` + 올바른 JSON | `ParsedBody::Json` |
//! | 그 외 (JSON 파싱 실패 포함) | `ParsedBody::Text` (UTF-8 lossy, 최대 500자) |

use std::collections::BTreeMap;

use actix_http::BoxedPayloadStream;
use actix_web::body::{BoxBody, MessageBody, to_bytes};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::error::PayloadError;
use actix_web::http::header::{self, HeaderMap};
use actix_web::web::{Bytes, BytesMut};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use futures_util::{StreamExt, stream};
use serde::Serialize;
use serde_json::Value;

use crate::utils::string_utils::truncate_chars;

/// 요청 ID를 찾는 헤더 (앞쪽이 우선)
pub const REQUEST_ID_HEADERS: [&str; 4] = ["request-id", "Request-ID", "X-Request-ID", "x-request-id"];

/// 응답에 요청 ID를 싣는 헤더
pub const RESPONSE_REQUEST_ID_HEADER: &str = "X-Request-ID";

/// JSON 응답 본문에 요청 ID를 넣는 키
pub const REQUEST_ID_BODY_KEY: &str = "request_id";

/// 로그에서 값을 가리는 헤더 (대소문자 무시)
pub const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "cookie", "x-api-key", "api-key"];

pub const MASK: &str = "***";

/// 텍스트 본문 로그 최대 길이 (문자 수)
pub const MAX_TEXT_BODY_CHARS: usize = 500;

/// 파싱된 본문
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedBody {
    Json(Value),
    Text(String),
}

impl ParsedBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ParsedBody::Json(value) => Some(value),
            ParsedBody::Text(_) => None,
        }
    }
}

/// 로깅 미들웨어가 request extensions에 저장하는 원본/파싱 본문
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedBody {
    pub raw: Bytes,
    pub parsed: Option<ParsedBody>,
}

impl CapturedBody {
    pub fn new(raw: Bytes, content_type: Option<&str>) -> Self {
        let parsed = parse_body(&raw, content_type);
        Self { raw, parsed }
    }
}

/// 본문을 규칙에 따라 파싱합니다. 실패하지 않습니다.
pub fn parse_body(bytes: &[u8], content_type: Option<&str>) -> Option<ParsedBody> {
    if bytes.is_empty() {
        return None;
    }

    let is_json = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
    if is_json {
        if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
            return Some(ParsedBody::Json(value));
        }
    }

    let text = String::from_utf8_lossy(bytes);
    Some(ParsedBody::Text(truncate_chars(&text, MAX_TEXT_BODY_CHARS)))
}

/// 로그용 헤더 맵. 민감한 헤더 값은 `***`로 바꿉니다.
///
/// 같은 이름의 헤더가 여러 개면 `, `로 이어 붙입니다.
pub fn mask_sensitive_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut masked: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in headers.iter() {
        let key = name.as_str().to_string();
        let value = if SENSITIVE_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name.as_str())) {
            MASK.to_string()
        } else {
            String::from_utf8_lossy(value.as_bytes()).into_owned()
        };

        masked
            .entry(key)
            .and_modify(|existing| {
                if existing != MASK {
                    existing.push_str(", ");
                    existing.push_str(&value);
                }
            })
            .or_insert(value);
    }
    masked
}

/// 본문을 다시 만들 때 맞지 않게 되는 `content-length`를 제거합니다.
pub fn normalize_headers(headers: &mut HeaderMap) {
    headers.remove(header::CONTENT_LENGTH);
}

/// 요청 헤더에서 요청 ID를 찾습니다. 빈 값은 없는 것으로 취급합니다.
pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    REQUEST_ID_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok())
}

/// 요청 payload 읽기 실패. 실패 전까지 받은 본문을 함께 보관합니다.
#[derive(Debug)]
pub struct BodyReadError {
    pub partial: Bytes,
    pub error: PayloadError,
}

impl BodyReadError {
    /// 받은 본문을 먼저 내보내고 같은 에러로 끝나는 payload.
    /// 다음 서비스의 본문 추출기는 원래 요청과 똑같이 실패합니다.
    pub fn into_payload(self) -> Payload {
        let mut chunks = Vec::with_capacity(2);
        if !self.partial.is_empty() {
            chunks.push(Ok(self.partial));
        }
        chunks.push(Err(self.error));

        let stream: BoxedPayloadStream = Box::pin(stream::iter(chunks));
        Payload::from(stream)
    }
}

/// 요청 payload를 끝까지 읽습니다.
pub async fn read_request_body(req: &mut ServiceRequest) -> Result<Bytes, BodyReadError> {
    let mut payload = req.take_payload();
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        match chunk {
            Ok(chunk) => body.extend_from_slice(&chunk),
            Err(error) => {
                return Err(BodyReadError {
                    partial: body.freeze(),
                    error,
                });
            }
        }
    }
    Ok(body.freeze())
}

/// 버퍼링된 본문으로 새 payload를 만듭니다. 다음 서비스가 본문을 다시 읽을 수 있습니다.
pub fn bytes_to_payload(bytes: Bytes) -> Payload {
    let (_, mut payload) = actix_http::h1::Payload::create(true);
    payload.unread_data(bytes);
    Payload::from(payload)
}

/// 응답 본문을 모두 읽고 (요청, 본문 없는 응답, 본문)으로 나눕니다.
pub async fn drain_response<B>(res: ServiceResponse<B>) -> Result<(HttpRequest, HttpResponse<()>, Bytes), Error>
where
    B: MessageBody + 'static,
{
    let (req, res) = res.into_parts();
    let (head, body) = res.into_parts();

    let bytes = to_bytes(body).await.map_err(|e| {
        let e: Box<dyn std::error::Error> = e.into();
        actix_web::error::ErrorInternalServerError(e.to_string())
    })?;

    Ok((req, head, bytes))
}

/// 나눠진 응답을 새 본문으로 다시 조립합니다. `content-length`는 제거됩니다.
pub fn rebuild_response(req: HttpRequest, mut head: HttpResponse<()>, body: Bytes) -> ServiceResponse<BoxBody> {
    normalize_headers(head.headers_mut());
    ServiceResponse::new(req, head.set_body(body).map_into_boxed_body())
}

/// 핸들러에서 요청 본문을 받는 추출기
///
/// 로깅 미들웨어가 캡처한 본문을 재사용하고, 미들웨어가 없으면 payload를 직접 읽습니다.
///
/// # Examples
///
/// ```rust,ignore
/// async fn create(body: RequestBody) -> HttpResponse {
///     match body.as_json() {
///         Some(json) => HttpResponse::Ok().json(json),
///         None => HttpResponse::BadRequest().finish(),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody(pub Option<ParsedBody>);

impl RequestBody {
    pub fn as_json(&self) -> Option<&Value> {
        self.0.as_ref().and_then(ParsedBody::as_json)
    }

    pub fn into_inner(self) -> Option<ParsedBody> {
        self.0
    }
}

impl FromRequest for RequestBody {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if let Some(captured) = req.extensions().get::<CapturedBody>() {
            let parsed = captured.parsed.clone();
            return Box::pin(async move { Ok(RequestBody(parsed)) });
        }

        let content_type = content_type(req.headers()).map(str::to_string);
        let bytes = Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = bytes.await?;
            Ok(RequestBody(parse_body(&bytes, content_type.as_deref())))
        })
    }
}
