//! # Configuration Module
//!
//! 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 데이터베이스, 캐시, Rate Limiting 설정
//! - [`auth_config`] - 외부 IdP, 전화번호 인증, OAuth 프로바이더 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수
//!
//! ```bash
//! # IdP (Identity Toolkit REST API)
//! export IDP_API_KEY="your-web-api-key"
//! export IDP_PROJECT_ID="your-project-id"
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="identity_bridge_dev"
//! export REDIS_URL="redis://localhost:6379"
//! export IDP_BASE_URL="https://identitytoolkit.googleapis.com/v1"
//! export PHONE_VERIFICATION_TTL_SECONDS="300"
//! ```

use std::env;
use crate::errors::AppError;

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

/// 필수 환경 변수를 읽습니다. 비어 있거나 없으면 `ConfigError`를 반환합니다.
pub(crate) fn required_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::ConfigError(format!("{} must be set", name))),
    }
}

/// 선택적 환경 변수를 읽고 파싱합니다. 없거나 파싱에 실패하면 기본값을 사용합니다.
pub(crate) fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_var_missing() {
        let result = required_var("IDENTITY_BRIDGE_SURELY_UNSET_VARIABLE");
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_parsed_var_default() {
        assert_eq!(parsed_var("IDENTITY_BRIDGE_SURELY_UNSET_NUMBER", 42u64), 42);
    }
}
