use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::domain::entities::users::user::LocalUser;
use super::auth_response::SessionResponse;

/// 사용자 응답 DTO
///
/// 외부 노출용 필드만 포함합니다. IdP 토큰은 세션 응답으로 따로 전달됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LocalUser> for UserResponse {
    fn from(user: LocalUser) -> Self {
        let LocalUser {
            id,
            name,
            email,
            phone_number,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.unwrap_or_default(),
            name,
            email,
            phone_number,
            created_at,
            updated_at,
        }
    }
}

/// 회원가입 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub session: SessionResponse,
    pub message: String,
}
