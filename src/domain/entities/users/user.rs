//! Local User Entity
//!
//! IdP 계정과 1:1로 대응하는 로컬 사용자 미러입니다.
//! 비밀번호는 IdP만 보관하며 이 엔티티에는 절대 저장되지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 로컬 사용자 레코드 (`users` 컬렉션)
///
/// `email` 은 저장된 그대로 비교하며(대소문자 구분) 유니크 인덱스가 걸려 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalUser {
    /// 저장소가 부여하는 불투명 식별자. 저장 전에는 `None`
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    /// 가장 최근에 IdP가 발급한 ID 토큰
    pub external_id_token: String,
    /// 전화번호 인증이 완료된 경우에만 채워집니다 (E.164)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalUser {
    pub fn new(name: String, email: String, external_id_token: String) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            name,
            email,
            external_id_token,
            phone_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> String {
        self.id.clone().unwrap_or_default()
    }
}
