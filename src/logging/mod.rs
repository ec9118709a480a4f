//! # 로깅 모듈
//!
//! `log` 파사드 + `env_logger` 위에 한 줄짜리 JSON 포맷터를 얹습니다.
//! 로그 레벨은 `RUST_LOG` 환경 변수로 조정하며 기본값은 `info`입니다.
//!
//! ## 출력 형식
//!
//! ```json
//! {"caller":"src/handlers/users.rs:42","level":"INFO","msg":"User created successfully","requestId":"abc-123","ts":"2024-05-01 12:00:00,123","user_id":7}
//! ```
//!
//! - `ts`: 로컬 시각 (`%Y-%m-%d %H:%M:%S,%3f`)
//! - `caller`: 로그를 남긴 소스 위치
//! - 구조화 필드: `info!(user_id = 7; "...")` 형태의 key/value가 그대로 필드가 됩니다.
//! - `requestId`: 요청 처리 중일 때만 포함됩니다.

use std::io::Write;

use chrono::Local;
use env_logger::Env;
use log::Record;
use log::kv::{self, Key, VisitSource};
use serde_json::{Map, Value};

use crate::middlewares::context::current_request_id;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// 전역 로거를 JSON 포맷으로 초기화합니다. 프로세스에서 한 번만 호출해야 합니다.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", render_record(record)))
        .init();
}

/// 로그 레코드 하나를 JSON 한 줄로 만듭니다.
pub fn render_record(record: &Record<'_>) -> String {
    let mut fields = Map::new();
    fields.insert("ts".to_string(), Value::String(Local::now().format(TIMESTAMP_FORMAT).to_string()));
    fields.insert("level".to_string(), Value::String(record.level().as_str().to_string()));
    fields.insert(
        "caller".to_string(),
        Value::String(format!(
            "{}:{}",
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or_default()
        )),
    );
    fields.insert("msg".to_string(), Value::String(record.args().to_string()));

    let _ = record.key_values().visit(&mut FieldCollector(&mut fields));

    let request_id = current_request_id();
    if !request_id.is_empty() {
        fields.insert("requestId".to_string(), Value::String(request_id));
    }

    Value::Object(fields).to_string()
}

/// 구조화 key/value를 JSON 필드로 옮깁니다.
struct FieldCollector<'a>(&'a mut Map<String, Value>);

impl<'kvs> VisitSource<'kvs> for FieldCollector<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        let json = serde_json::to_value(&value).unwrap_or_else(|_| Value::String(value.to_string()));
        self.0.insert(key.as_str().to_string(), json);
        Ok(())
    }
}
