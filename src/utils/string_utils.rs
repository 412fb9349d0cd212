//! # 문자열 유틸리티
//!
//! 입력값 정리와 IdP 응답 파싱에 쓰이는 공통 유틸리티 함수들입니다.

use serde::Deserialize;
use crate::errors::AppError;

/// 필수 문자열 필드를 검증하고 앞뒤 공백을 제거합니다.
///
/// # Examples
///
/// ```rust,ignore
/// let name = validate_required_string("  Ada  ", "name")?;
/// assert_eq!(name, "Ada");
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// E.164 형식 전화번호 여부 (`+` 다음 8~15자리 숫자, 첫 자리는 0이 아님)
pub fn is_e164_phone_number(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('+') else {
        return false;
    };

    (8..=15).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

/// 문자열(`"3600"`) 또는 숫자(`3600`)로 오는 초 단위 값을 u64 로 역직렬화합니다.
///
/// IdP는 `expiresIn` 을 문자열로 보내지만 테스트 더블이나 다른 구현은 숫자를 보낼 수 있습니다.
pub fn deserialize_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Number(u64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Number(value) => Ok(value),
        StringOrNumber::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid seconds value: {}", text))),
    }
}
