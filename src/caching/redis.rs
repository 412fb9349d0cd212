//! # Redis 클라이언트 구현
//!
//! 만료 시간이 필요한 임시 데이터(전화번호 인증 세션 등)를 보관하는 Redis 클라이언트입니다.
//! 값은 Serde를 통해 JSON 문자열로 저장됩니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager`가 단일 멀티플렉싱 연결을 공유하고, 끊어지면 자동으로 재연결합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::config::CacheConfig;
use crate::errors::AppError;

#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
}

impl RedisClient {
    /// `REDIS_URL` 로 연결하고 PING 으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, AppError> {
        let client = Client::open(CacheConfig::redis_url())
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        let mut connection = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        redis::cmd("PING")
            .query_async::<()>(&mut connection)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { connection })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| AppError::RedisError(format!("역직렬화 실패: {}", e)))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), AppError> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::RedisError(format!("직렬화 실패: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    pub async fn del(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}
