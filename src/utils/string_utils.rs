//! # 문자열 유틸리티
//!
//! 요청 필드 정리와 이메일 정규화에 사용하는 공통 함수들입니다.

use serde::Deserialize;
use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 인자
/// * `value` - 검증할 문자열
/// * `field_name` - 필드명 (에러 메시지용)
///
/// # 반환값
/// * `Ok(String)` - 정리된 유효한 문자열
/// * `Err(AppError)` - 빈 문자열이거나 공백만 있는 경우
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환합니다.
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

/// 이메일 정규화 (trim + 소문자)
///
/// 이메일 유일성은 대소문자를 구분하지 않으므로 저장과 조회 모두
/// 이 함수를 거친 값을 사용합니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 빈 문자열이나 공백만 있는 문자열을 None으로 변환하고,
/// 유효한 문자열은 앞뒤 공백을 제거한 후 Some으로 반환합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct Profile {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     phone: Option<String>,
/// }
///
/// // {"phone": "  010  "} → Some("010")
/// // {"phone": ""}        → None
/// // {"phone": null}      → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
