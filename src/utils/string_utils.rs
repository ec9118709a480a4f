//! # 문자열 유틸리티
//!
//! 에러 메시지 정리, 로그용 잘라내기, 선택 필드 정리 등 문자열 처리 함수들입니다.

use serde::Deserialize;

/// 개행과 탭을 포함한 모든 연속 공백을 공백 하나로 접습니다.
///
/// 에러 응답의 `detail`이 여러 줄로 나가지 않도록 할 때 사용합니다.
///
/// ```rust,ignore
/// assert_eq!(single_line("a\n\tb  c"), "a b c");
/// ```
pub fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 문자(char) 기준으로 최대 `max_chars`개까지만 남깁니다.
///
/// 바이트 기준으로 자르면 멀티바이트 문자 중간에서 잘릴 수 있으므로 문자 단위로 셉니다.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// 값이 없거나 공백뿐인지 확인
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// 선택적 문자열 필드 정리
///
/// None 이거나 공백뿐이면 None, 아니면 앞뒤 공백을 제거한 값을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 사용합니다.
/// 빈 문자열과 공백뿐인 문자열은 None이 됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_collapses_whitespace() {
        assert_eq!(single_line("Failed to create user:\n\tduplicate\r\n key"), "Failed to create user: duplicate key");
        assert_eq!(single_line("  already single  "), "already single");
        assert_eq!(single_line(""), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("안녕하세요", 2), "안녕");
        assert_eq!(truncate_chars(&"x".repeat(600), 500).chars().count(), 500);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t")));
        assert!(!is_blank(Some("a")));
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Address {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            address: Option<String>,
        }

        let parsed: Address = serde_json::from_str(r#"{"address": "  서울시 강남구  "}"#).unwrap();
        assert_eq!(parsed.address, Some("서울시 강남구".to_string()));

        let parsed: Address = serde_json::from_str(r#"{"address": "   "}"#).unwrap();
        assert_eq!(parsed.address, None);

        let parsed: Address = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.address, None);
    }
}
