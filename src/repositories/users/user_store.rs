use async_trait::async_trait;
use crate::domain::entities::users::user::LocalUser;
use crate::errors::AppError;

/// 로컬 사용자 저장소 계약
///
/// 이메일은 저장된 그대로(대소문자 구분) 비교합니다.
/// 동일 이메일의 중복 삽입은 `AppError::DuplicateAccount` 로 거부해야 합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists(&self, email: &str) -> Result<bool, AppError>;

    /// 사용자를 저장하고 저장소가 부여한 식별자를 반환합니다.
    async fn insert(&self, user: LocalUser) -> Result<String, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<LocalUser>, AppError>;

    /// 삭제된 레코드가 있으면 `true`
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    /// 최신 IdP ID 토큰으로 갱신합니다. 대상이 없으면 `false`
    async fn update_external_token(&self, email: &str, token: &str) -> Result<bool, AppError>;

    /// 인증된 전화번호를 기록합니다. 대상이 없으면 `false`
    async fn update_phone_number(&self, email: &str, phone_number: &str) -> Result<bool, AppError>;
}
