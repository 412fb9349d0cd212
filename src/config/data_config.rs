//! 데이터 및 서버 설정 관리 모듈
//!
//! 서버 바인딩, MongoDB, Redis, Rate Limiting 관련 설정을 관리합니다.

use std::env;
use super::parsed_var;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수로부터 현재 환경을 결정합니다. 기본값은 Production 입니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        parsed_var("PORT", 8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    pub fn workers() -> usize {
        parsed_var("SERVER_WORKERS", 4)
    }
}

pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "identity_bridge_dev".to_string())
    }
}

pub struct CacheConfig;

impl CacheConfig {
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_env() -> Self {
        let config = Self {
            per_second: parsed_var("RATE_LIMIT_PER_SECOND", 100),
            burst_size: parsed_var("RATE_LIMIT_BURST_SIZE", 200),
        };

        log::info!("Rate Limiting 설정 로드됨: {:?}", config);
        config
    }
}
