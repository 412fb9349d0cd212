//! # Authentication Configuration Module
//!
//! 외부 IdP(Identity Toolkit REST API), 전화번호 인증, OAuth 프로바이더 관련
//! 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export IDP_API_KEY="your-web-api-key"      # 모든 IdP 호출의 ?key= 파라미터
//! export IDP_PROJECT_ID="your-project-id"    # ID 토큰의 aud / iss 검증
//! ```
//!
//! ## 선택적 환경 변수
//!
//! ```bash
//! export IDP_BASE_URL="https://identitytoolkit.googleapis.com/v1"
//! export IDP_JWKS_URL="https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com"
//! export IDP_ISSUER_PREFIX="https://securetoken.google.com/"
//! export IDP_OAUTH_REQUEST_URI="http://localhost"
//! export IDP_KEYS_FALLBACK_TTL_SECONDS="3600"
//! export PHONE_VERIFICATION_TTL_SECONDS="300"
//! ```

use std::env;
use crate::errors::AppError;
use super::{parsed_var, required_var};

pub struct IdentityProviderConfig;

impl IdentityProviderConfig {
    pub fn api_key() -> Result<String, AppError> {
        required_var("IDP_API_KEY")
    }

    pub fn project_id() -> Result<String, AppError> {
        required_var("IDP_PROJECT_ID")
    }

    pub fn base_url() -> String {
        env::var("IDP_BASE_URL")
            .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".to_string())
    }

    /// ID 토큰 서명 검증용 공개키 세트(JWKS) 주소
    pub fn jwks_url() -> String {
        env::var("IDP_JWKS_URL").unwrap_or_else(|_| {
            "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com"
                .to_string()
        })
    }

    pub fn issuer_prefix() -> String {
        env::var("IDP_ISSUER_PREFIX")
            .unwrap_or_else(|_| "https://securetoken.google.com/".to_string())
    }

    /// `signInWithIdp` 호출 시 전달하는 requestUri
    pub fn oauth_request_uri() -> String {
        env::var("IDP_OAUTH_REQUEST_URI").unwrap_or_else(|_| "http://localhost".to_string())
    }

    /// 키 세트 응답에 Cache-Control max-age 가 없을 때 사용하는 캐시 시간
    pub fn keys_fallback_ttl_seconds() -> u64 {
        parsed_var("IDP_KEYS_FALLBACK_TTL_SECONDS", 3600)
    }
}

pub struct PhoneVerificationConfig;

impl PhoneVerificationConfig {
    /// 발송된 인증번호 세션을 보관하는 시간 (초)
    pub fn ttl_seconds() -> u64 {
        parsed_var("PHONE_VERIFICATION_TTL_SECONDS", 300)
    }
}

/// IdP에 연동된 OAuth 프로바이더
///
/// IdP의 `providerId` 값(`google.com` 등)으로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OAuthProvider {
    #[serde(rename = "google.com")]
    Google,

    #[serde(rename = "facebook.com")]
    Facebook,

    #[serde(rename = "github.com")]
    GitHub,

    #[serde(rename = "apple.com")]
    Apple,
}

impl OAuthProvider {
    /// `google` 또는 `google.com` 형태 모두 허용합니다. 대소문자는 구분하지 않습니다.
    pub fn from_str(s: &str) -> Result<Self, AppError> {
        let normalized = s.trim().to_lowercase();
        match normalized.trim_end_matches(".com") {
            "google" => Ok(OAuthProvider::Google),
            "facebook" => Ok(OAuthProvider::Facebook),
            "github" => Ok(OAuthProvider::GitHub),
            "apple" => Ok(OAuthProvider::Apple),
            _ => Err(AppError::ValidationError(format!("Unsupported OAuth provider: {}", s))),
        }
    }

    /// IdP의 providerId 값
    pub fn provider_id(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google.com",
            OAuthProvider::Facebook => "facebook.com",
            OAuthProvider::GitHub => "github.com",
            OAuthProvider::Apple => "apple.com",
        }
    }
}
