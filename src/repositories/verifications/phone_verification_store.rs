use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use async_trait::async_trait;
use crate::caching::redis::RedisClient;
use crate::domain::models::phone::PendingPhoneVerification;
use crate::errors::AppError;

/// 사용자(subject)당 하나의 진행 중인 인증만 유지합니다. 새 요청은 이전 요청을 덮어씁니다.
#[async_trait]
pub trait PhoneVerificationStore: Send + Sync {
    async fn save(&self, pending: &PendingPhoneVerification, ttl_seconds: u64) -> Result<(), AppError>;

    /// 만료되었거나 없으면 `None`
    async fn find(&self, subject: &str) -> Result<Option<PendingPhoneVerification>, AppError>;

    async fn remove(&self, subject: &str) -> Result<(), AppError>;
}

/// Redis `SET EX` 기반 구현
pub struct RedisPhoneVerificationStore {
    redis: Arc<RedisClient>,
}

impl RedisPhoneVerificationStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl PhoneVerificationStore for RedisPhoneVerificationStore {
    async fn save(&self, pending: &PendingPhoneVerification, ttl_seconds: u64) -> Result<(), AppError> {
        let key = PendingPhoneVerification::storage_key(&pending.subject);
        self.redis.set_with_expiry(&key, pending, ttl_seconds).await
    }

    async fn find(&self, subject: &str) -> Result<Option<PendingPhoneVerification>, AppError> {
        let key = PendingPhoneVerification::storage_key(subject);
        self.redis.get(&key).await
    }

    async fn remove(&self, subject: &str) -> Result<(), AppError> {
        let key = PendingPhoneVerification::storage_key(subject);
        self.redis.del(&key).await
    }
}

/// 프로세스 메모리 구현. 만료는 조회 시점에 판단합니다.
#[derive(Default)]
pub struct InMemoryPhoneVerificationStore {
    entries: Mutex<HashMap<String, (PendingPhoneVerification, Instant)>>,
}

impl InMemoryPhoneVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> AppError {
        AppError::InternalError("phone verification store lock poisoned".to_string())
    }
}

#[async_trait]
impl PhoneVerificationStore for InMemoryPhoneVerificationStore {
    async fn save(&self, pending: &PendingPhoneVerification, ttl_seconds: u64) -> Result<(), AppError> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.insert(pending.subject.clone(), (pending.clone(), expires_at));
        Ok(())
    }

    async fn find(&self, subject: &str) -> Result<Option<PendingPhoneVerification>, AppError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;

        match entries.get(subject) {
            Some((pending, expires_at)) if Instant::now() < *expires_at => Ok(Some(pending.clone())),
            Some(_) => {
                entries.remove(subject);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, subject: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.remove(subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(subject: &str, phone: &str) -> PendingPhoneVerification {
        PendingPhoneVerification::new(
            subject.into(),
            "ada@example.com".into(),
            phone.into(),
            "session-info".into(),
        )
    }

    #[actix_web::test]
    async fn test_save_find_remove() {
        let store = InMemoryPhoneVerificationStore::new();
        store.save(&pending("uid-1", "+821012345678"), 300).await.unwrap();

        let found = store.find("uid-1").await.unwrap().unwrap();
        assert_eq!(found.phone_number, "+821012345678");
        assert!(store.find("uid-2").await.unwrap().is_none());

        store.remove("uid-1").await.unwrap();
        assert!(store.find("uid-1").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_new_request_replaces_previous() {
        let store = InMemoryPhoneVerificationStore::new();
        store.save(&pending("uid-1", "+821011111111"), 300).await.unwrap();
        store.save(&pending("uid-1", "+821022222222"), 300).await.unwrap();

        let found = store.find("uid-1").await.unwrap().unwrap();
        assert_eq!(found.phone_number, "+821022222222");
    }

    #[actix_web::test]
    async fn test_zero_ttl_expires_immediately() {
        let store = InMemoryPhoneVerificationStore::new();
        store.save(&pending("uid-1", "+821012345678"), 0).await.unwrap();

        assert!(store.find("uid-1").await.unwrap().is_none());
    }
}
