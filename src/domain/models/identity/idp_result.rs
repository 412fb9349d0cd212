//! Identity Toolkit REST 응답 모델
//!
//! IdP는 camelCase JSON 으로 응답하며 `expiresIn` 은 십진수 문자열입니다.
//! 알 수 없는 필드는 무시합니다.

use serde::Deserialize;
use crate::errors::AppError;
use crate::utils::string_utils::deserialize_seconds;

/// 이메일/비밀번호, 익명 로그인 등 토큰을 발급하는 호출의 결과
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpAuthResult {
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub local_id: String,
    #[serde(rename = "expiresIn", deserialize_with = "deserialize_seconds")]
    pub expires_in_seconds: u64,
    #[serde(default)]
    pub email: Option<String>,
}

/// `signInWithIdp` 결과. 기본 토큰 필드에 OAuth 프로바이더 정보가 더해집니다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpOAuthResult {
    #[serde(flatten)]
    pub auth: IdpAuthResult,
    pub federated_id: String,
    pub provider_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_new_user: bool,
}

/// `sendVerificationCode` 결과
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpVerificationSession {
    pub session_info: String,
}

/// `signInWithPhoneNumber` 결과
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpPhoneConfirmation {
    pub phone_number: String,
    #[serde(default)]
    pub local_id: Option<String>,
}

/// 본문을 사용하지 않는 호출(`sendOobCode`, `delete`)의 결과
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IdpEmptyResult {}

/// non-2xx 응답 본문: `{"error": {"code": 400, "message": "EMAIL_EXISTS"}}`
#[derive(Debug, Clone, Deserialize)]
pub struct IdpErrorEnvelope {
    pub error: IdpErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdpErrorBody {
    pub code: u16,
    pub message: String,
}

impl From<IdpErrorEnvelope> for AppError {
    fn from(envelope: IdpErrorEnvelope) -> Self {
        AppError::IdentityProviderError {
            code: envelope.error.code,
            message: envelope.error.message,
        }
    }
}
