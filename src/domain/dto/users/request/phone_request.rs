//! 전화번호 인증 요청 DTO
use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::utils::string_utils::is_e164_phone_number;

/// 인증번호 발송 요청
#[derive(Debug, Deserialize, Validate)]
pub struct PhoneVerificationRequest {
    /// E.164 형식 (`+821012345678`)
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,

    /// 클라이언트에서 받은 reCAPTCHA 토큰
    #[validate(length(min = 1, message = "reCAPTCHA 토큰이 필요합니다"))]
    pub recaptcha_token: String,
}

/// 인증번호 확인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct PhoneVerificationConfirmRequest {
    #[validate(length(min = 4, max = 10, message = "인증번호 형식이 올바르지 않습니다"))]
    pub code: String,
}

fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if !is_e164_phone_number(phone_number) {
        return Err(ValidationError::new("invalid_phone_number")
            .with_message("전화번호는 E.164 형식이어야 합니다 (예: +821012345678)".into()));
    }
    Ok(())
}
