//! 인메모리 사용자 저장소
//!
//! MongoDB 없이 동작하는 [`UserStore`] 구현입니다. 테스트와 로컬 개발에 사용합니다.

use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use crate::domain::entities::users::user::LocalUser;
use crate::errors::AppError;
use super::user_store::UserStore;

/// 식별자 → 사용자 맵. 잠금은 await 지점을 넘어 유지되지 않습니다.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, LocalUser>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> AppError {
        AppError::InternalError("user store lock poisoned".to_string())
    }

    fn update_with<F>(&self, email: &str, apply: F) -> Result<bool, AppError>
    where
        F: FnOnce(&mut LocalUser),
    {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        match users.values_mut().find(|user| user.email == email) {
            Some(user) => {
                apply(user);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn exists(&self, email: &str) -> Result<bool, AppError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().any(|user| user.email == email))
    }

    async fn insert(&self, mut user: LocalUser) -> Result<String, AppError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::DuplicateAccount(user.email));
        }

        let id = Uuid::new_v4().to_string();
        user.id = Some(id.clone());
        users.insert(id.clone(), user);

        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<LocalUser>, AppError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        Ok(users.remove(id).is_some())
    }

    async fn update_external_token(&self, email: &str, token: &str) -> Result<bool, AppError> {
        self.update_with(email, |user| user.external_id_token = token.to_string())
    }

    async fn update_phone_number(&self, email: &str, phone_number: &str) -> Result<bool, AppError> {
        self.update_with(email, |user| user.phone_number = Some(phone_number.to_string()))
    }
}
