//! 애플리케이션 설정 관리 모듈
//!
//! 서버, 데이터베이스, 컴포넌트 설정을 JSON 파일에서 읽어 [`AppConfig`] 하나로 관리합니다.
//! 키 정규화(대문자화, `-` → `_`)는 로딩 시 한 번만 수행되고, 이후에는 필드로 직접 접근합니다.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::errors::ConfigError;
use crate::core::registry::ComponentEndpoint;

/// 기본 설정 파일 후보 경로 (앞쪽이 우선)
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["/etc/config.json", "config.json"];

/// `/config` 엔드포인트와 로그에서 값을 가리는 키
const MASKED_KEYS: [&str; 1] = ["DB_PASSWORD"];

/// 애플리케이션 설정
///
/// 인식하는 키는 `SERVER_HOST`, `SERVER_PORT`, `APP_NAME`, `ENV`, `DB_HOST`, `DB_PORT`,
/// `DB_USER`, `DB_PASSWORD`, `DB_NAME`, `COMPONENTS`, `LOG_EXCLUDED_PATHS` 입니다.
/// 파일에 없는 키는 기본값을 사용하고, 모르는 키는 무시합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct AppConfig {
    pub server_host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub server_port: u16,
    pub app_name: String,
    pub env: String,
    pub db_host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    /// `componentName → [{host, status}]`
    pub components: Option<BTreeMap<String, Vec<ComponentEndpoint>>>,
    /// 요청/응답 로깅을 건너뛸 경로
    pub log_excluded_paths: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            app_name: "app".to_string(),
            env: "dev1".to_string(),
            db_host: "localhost".to_string(),
            db_port: 3306,
            db_user: "root".to_string(),
            db_password: String::new(),
            db_name: "testdb".to_string(),
            components: None,
            log_excluded_paths: vec!["/health".to_string()],
        }
    }
}

/// 포트는 숫자와 숫자 문자열을 모두 허용합니다.
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// 최상위 키를 대문자 + `_` 형태로 정규화합니다.
fn canonicalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_uppercase().replace('-', "_"), value))
                .collect(),
        ),
        other => other,
    }
}

impl AppConfig {
    /// 기본 후보 경로에서 설정을 읽습니다.
    ///
    /// 어느 파일도 없으면 기본값을 반환합니다.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&CONFIG_FILE_CANDIDATES)
    }

    /// 주어진 후보 경로를 순서대로 시도합니다. 처음 발견된 파일을 사용합니다.
    ///
    /// - 파일 없음 → 다음 후보
    /// - 파일은 있지만 읽기 실패 → [`ConfigError::Read`]
    /// - JSON 파싱 실패 → [`ConfigError::Parse`]
    pub fn load_from<P: AsRef<Path>>(candidates: &[P]) -> Result<Self, ConfigError> {
        for candidate in candidates {
            let path = candidate.as_ref();
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(ConfigError::Read { path: path.to_path_buf(), source });
                }
            };

            let config = Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            info!(file:% = path.display(); "Read configs from");
            return Ok(config);
        }

        warn!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// JSON 문서를 정규화한 뒤 역직렬화합니다.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let raw: Value = serde_json::from_str(text)?;
        serde_json::from_value(canonicalize_keys(raw))
    }

    /// 실제 바인딩 포트. `PORT` 환경 변수가 숫자이면 설정값보다 우선합니다.
    pub fn bind_port(&self) -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|port| port.trim().parse().ok())
            .unwrap_or(self.server_port)
    }

    /// `(KEY, 값)` 목록. 비밀번호는 `***`로 가립니다.
    pub fn entries(&self) -> Vec<(String, String)> {
        let components = self
            .components
            .as_ref()
            .and_then(|c| serde_json::to_string(c).ok())
            .unwrap_or_else(|| "null".to_string());

        let entries = [
            ("SERVER_HOST", self.server_host.clone()),
            ("SERVER_PORT", self.server_port.to_string()),
            ("APP_NAME", self.app_name.clone()),
            ("ENV", self.env.clone()),
            ("DB_HOST", self.db_host.clone()),
            ("DB_PORT", self.db_port.to_string()),
            ("DB_USER", self.db_user.clone()),
            ("DB_PASSWORD", self.db_password.clone()),
            ("DB_NAME", self.db_name.clone()),
            ("COMPONENTS", components),
            ("LOG_EXCLUDED_PATHS", self.log_excluded_paths.join(",")),
        ];

        entries
            .into_iter()
            .map(|(key, value)| {
                let value = if MASKED_KEYS.contains(&key) { "***".to_string() } else { value };
                (key.to_string(), value)
            })
            .collect()
    }

    /// 설정 파일이 지정한 컴포넌트 목록. 없으면 `DB_HOST:DB_PORT`의 MySQL 하나를 사용합니다.
    pub fn components_or_default(&self) -> BTreeMap<String, Vec<ComponentEndpoint>> {
        match &self.components {
            Some(components) => components.clone(),
            None => {
                info!("No COMPONENTS config found, using default MySQL registration");
                BTreeMap::from([(
                    "mysql".to_string(),
                    vec![ComponentEndpoint::new(format!("{}:{}", self.db_host, self.db_port), "up")],
                )])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.app_name, "app");
        assert_eq!(config.env, "dev1");
        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_user, "root");
        assert_eq!(config.db_password, "");
        assert_eq!(config.db_name, "testdb");
        assert_eq!(config.log_excluded_paths, vec!["/health"]);
    }

    #[test]
    fn test_keys_are_canonicalized() {
        let config = AppConfig::from_json_str(
            r#"{"db_host": "db.internal", "Db-Port": "3307", "app-name": "users", "unknown": 1}"#,
        )
        .unwrap();

        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.db_port, 3307);
        assert_eq!(config.app_name, "users");
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_components_section() {
        let config = AppConfig::from_json_str(
            r#"{"components": {"svc": [{"host": "h:1", "status": "down"}]}}"#,
        )
        .unwrap();

        let components = config.components_or_default();
        assert_eq!(components["svc"], vec![ComponentEndpoint::new("h:1", "down")]);
    }

    #[test]
    fn test_default_components_use_db_host() {
        let config = AppConfig::from_json_str(r#"{"DB_HOST": "mysql", "DB_PORT": 3310}"#).unwrap();

        let components = config.components_or_default();
        assert_eq!(components["mysql"], vec![ComponentEndpoint::new("mysql:3310", "up")]);
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&[dir.path().join("nope.json")]).unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let second = write_config(&dir, "second.json", r#"{"APP_NAME": "second"}"#);
        let third = write_config(&dir, "third.json", r#"{"APP_NAME": "third"}"#);

        let config = AppConfig::load_from(&[dir.path().join("first.json"), second, third]).unwrap();

        assert_eq!(config.app_name, "second");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write_config(&dir, "broken.json", "{ not json");
        let valid = write_config(&dir, "valid.json", "{}");

        let err = AppConfig::load_from(&[broken, valid]).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_entries_mask_password() {
        let config = AppConfig::from_json_str(r#"{"DB_PASSWORD": "secret"}"#).unwrap();
        let entries = config.entries();

        let password = entries.iter().find(|(k, _)| k == "DB_PASSWORD").unwrap();
        assert_eq!(password.1, "***");
        assert!(entries.iter().all(|(_, v)| !v.contains("secret")));
        assert_eq!(entries[0], ("SERVER_HOST".to_string(), "0.0.0.0".to_string()));
    }
}
