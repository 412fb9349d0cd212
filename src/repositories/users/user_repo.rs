//! # 사용자 리포지토리 구현
//!
//! 로컬 사용자 미러를 MongoDB `users` 컬렉션에 저장합니다.
//!
//! ## 특징
//!
//! - **문자열 식별자**: `_id` 는 UUID v4 문자열로 저장소가 부여합니다
//! - **데이터 무결성**: `email` 유니크 인덱스가 동시 가입 경쟁의 최종 방어선입니다
//! - **중복 키 변환**: MongoDB 에러 코드 11000 은 `DuplicateAccount` 로 변환됩니다

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use uuid::Uuid;
use crate::{
    db::Database,
    domain::entities::users::user::LocalUser,
    errors::AppError,
};
use super::user_store::UserStore;

const COLLECTION_NAME: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB 기반 사용자 저장소
///
/// ## 인덱스
///
/// - `email_unique`: email (unique)
/// - `created_at_desc`: created_at (desc)
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let db = Arc::new(Database::new().await?);
/// let repo = UserRepository::new(db);
/// repo.create_indexes().await?;
///
/// let id = repo.insert(LocalUser::new(name, email, id_token)).await?;
/// let found = repo.find_by_email("ada@example.com").await?;
/// ```
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<LocalUser> {
        self.db.get_database().collection::<LocalUser>(COLLECTION_NAME)
    }

    /// 사용자 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 시작 시 한 번 호출됩니다. 이미 존재하는 인덱스는 그대로 유지됩니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
        matches!(
            error.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
        )
    }

    async fn update_field(&self, email: &str, field: &str, value: &str) -> Result<bool, AppError> {
        let mut fields = Document::new();
        fields.insert(field, value);
        fields.insert("updated_at", Utc::now().to_rfc3339());

        let result = self
            .collection()
            .update_one(doc! { "email": email }, doc! { "$set": fields })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.matched_count > 0)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn exists(&self, email: &str) -> Result<bool, AppError> {
        let count = self
            .collection()
            .count_documents(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    async fn insert(&self, mut user: LocalUser) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        user.id = Some(id.clone());

        self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if Self::is_duplicate_key(&e) {
                    AppError::DuplicateAccount(user.email.clone())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<LocalUser>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn update_external_token(&self, email: &str, token: &str) -> Result<bool, AppError> {
        self.update_field(email, "external_id_token", token).await
    }

    async fn update_phone_number(&self, email: &str, phone_number: &str) -> Result<bool, AppError> {
        self.update_field(email, "phone_number", phone_number).await
    }
}
