//! 진행 중인 전화번호 인증
//!
//! 인증번호 발송 후 확인 전까지 Redis 에 TTL 과 함께 보관됩니다.
//! 확인이 끝나거나 만료되면 사라집니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPhoneVerification {
    /// 인증을 요청한 사용자의 IdP 식별자
    pub subject: String,
    pub email: String,
    pub phone_number: String,
    /// IdP가 발급한 세션 정보. 확인 요청에 그대로 전달합니다.
    pub session_info: String,
    pub requested_at: DateTime<Utc>,
}

impl PendingPhoneVerification {
    pub fn new(subject: String, email: String, phone_number: String, session_info: String) -> Self {
        Self {
            subject,
            email,
            phone_number,
            session_info,
            requested_at: Utc::now(),
        }
    }

    /// 저장소 키
    pub fn storage_key(subject: &str) -> String {
        format!("phone_verification:{}", subject)
    }
}
