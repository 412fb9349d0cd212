use serde::{Deserialize, Serialize};
use crate::domain::models::identity::{IdpAuthResult, IdpOAuthResult};

/// IdP 세션 토큰 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub local_id: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl From<IdpAuthResult> for SessionResponse {
    fn from(result: IdpAuthResult) -> Self {
        Self {
            id_token: result.id_token,
            refresh_token: result.refresh_token,
            local_id: result.local_id,
            token_type: "Bearer".to_string(),
            expires_in: result.expires_in_seconds,
        }
    }
}

/// OAuth 액세스 토큰 로그인 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthSessionResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub provider_id: String,
    pub federated_id: String,
    pub display_name: Option<String>,
    pub is_new_user: bool,
}

impl From<IdpOAuthResult> for OAuthSessionResponse {
    fn from(result: IdpOAuthResult) -> Self {
        Self {
            session: result.auth.into(),
            provider_id: result.provider_id,
            federated_id: result.federated_id,
            display_name: result.display_name,
            is_new_user: result.is_new_user,
        }
    }
}

/// 처리 결과 메시지만 전달하는 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// 전화번호 인증 상태 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneVerificationResponse {
    pub phone_number: String,
    pub verified: bool,
    pub message: String,
}
