//! # Identity Toolkit REST 클라이언트
//!
//! 외부 IdP의 계정 API를 호출하는 클라이언트입니다.
//! 모든 호출은 `application/x-www-form-urlencoded` 본문의 POST 요청입니다.
//!
//! ```text
//! POST {base_url}/accounts:{operation}?key={api_key}
//! ```
//!
//! ## 응답 처리
//!
//! 응답 본문은 한 번만 읽은 뒤 상태 코드에 따라 해석합니다.
//!
//! | 상태 | 본문 | 결과 |
//! |------|------|------|
//! | 2xx | 파싱 가능 | 타입이 지정된 결과 |
//! | 2xx | 파싱 불가 | `TransportFailure` |
//! | non-2xx | `{"error":{"code","message"}}` | `IdentityProviderError` |
//! | non-2xx | 파싱 불가 | `TransportFailure` |
//! | 네트워크 오류 | - | `TransportFailure` |
//!
//! 재시도는 하지 않습니다.

use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use crate::config::{IdentityProviderConfig, OAuthProvider};
use crate::domain::models::identity::{
    IdpAuthResult, IdpEmptyResult, IdpErrorEnvelope, IdpOAuthResult, IdpPhoneConfirmation,
    IdpVerificationSession,
};
use crate::errors::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// IdP 계정 API 계약
///
/// IdP가 보고한 실패는 `IdentityProviderError` 로, 통신 실패는 `TransportFailure` 로 반환합니다.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_anonymously(&self) -> Result<IdpAuthResult, AppError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<IdpAuthResult, AppError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdpAuthResult, AppError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), AppError>;

    /// 비밀번호로 재인증한 뒤 새로 받은 토큰으로 원격 계정을 삭제합니다.
    async fn delete_remote_account(&self, email: &str, password: &str) -> Result<(), AppError>;

    async fn sign_in_with_oauth_access_token(
        &self,
        provider: OAuthProvider,
        access_token: &str,
    ) -> Result<IdpOAuthResult, AppError>;

    async fn send_phone_verification_code(
        &self,
        phone_number: &str,
        recaptcha_token: &str,
    ) -> Result<IdpVerificationSession, AppError>;

    /// 인증번호를 확인하고 전화번호를 `id_token` 의 계정에 연결합니다.
    async fn confirm_phone_number(
        &self,
        session_info: &str,
        code: &str,
        id_token: &str,
    ) -> Result<IdpPhoneConfirmation, AppError>;
}

/// reqwest 기반 Identity Toolkit 클라이언트
///
/// 내부 커넥션 풀을 공유하므로 하나만 만들어 `Arc` 로 공유합니다.
pub struct IdentityToolkitClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    oauth_request_uri: String,
}

impl IdentityToolkitClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        oauth_request_uri: impl Into<String>,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            oauth_request_uri: oauth_request_uri.into(),
        })
    }

    /// 환경 변수 설정으로 클라이언트를 생성합니다.
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(
            IdentityProviderConfig::base_url(),
            IdentityProviderConfig::api_key()?,
            IdentityProviderConfig::oauth_request_uri(),
        )
    }

    fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.base_url,
            operation,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        debug!("IdP 호출: accounts:{}", operation);

        let response = self
            .http
            .post(self.endpoint(operation))
            .form(params)
            .send()
            .await
            .map_err(|e| AppError::TransportFailure(format!("accounts:{} 요청 실패: {}", operation, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::TransportFailure(format!("accounts:{} 응답 수신 실패: {}", operation, e)))?;

        if status.is_success() {
            return serde_json::from_slice::<T>(&body).map_err(|e| {
                AppError::TransportFailure(format!("accounts:{} 응답 파싱 실패: {}", operation, e))
            });
        }

        match serde_json::from_slice::<IdpErrorEnvelope>(&body) {
            Ok(envelope) => {
                debug!(
                    "IdP 에러 응답: accounts:{} ({}) {}",
                    operation, envelope.error.code, envelope.error.message
                );
                Err(envelope.into())
            }
            Err(_) => Err(AppError::TransportFailure(format!(
                "accounts:{} 실패 (HTTP {}), 에러 본문을 해석할 수 없습니다",
                operation,
                status.as_u16()
            ))),
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn sign_in_anonymously(&self) -> Result<IdpAuthResult, AppError> {
        self.post_form("signUp", &[("returnSecureToken", "true")]).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<IdpAuthResult, AppError> {
        let params = [
            ("email", email),
            ("password", password),
            ("returnSecureToken", "true"),
        ];
        self.post_form("signUp", &params).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdpAuthResult, AppError> {
        let params = [
            ("email", email),
            ("password", password),
            ("returnSecureToken", "true"),
        ];
        self.post_form("signInWithPassword", &params).await
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AppError> {
        let params = [("email", email), ("requestType", "PASSWORD_RESET")];
        self.post_form::<IdpEmptyResult>("sendOobCode", &params).await?;
        Ok(())
    }

    async fn delete_remote_account(&self, email: &str, password: &str) -> Result<(), AppError> {
        let session = self.sign_in(email, password).await?;

        let params = [("idToken", session.id_token.as_str())];
        self.post_form::<IdpEmptyResult>("delete", &params).await?;
        Ok(())
    }

    async fn sign_in_with_oauth_access_token(
        &self,
        provider: OAuthProvider,
        access_token: &str,
    ) -> Result<IdpOAuthResult, AppError> {
        let post_body = format!(
            "providerId={}&access_token={}",
            provider.provider_id(),
            urlencoding::encode(access_token)
        );

        let params = [
            ("postBody", post_body.as_str()),
            ("requestUri", self.oauth_request_uri.as_str()),
            ("returnIdpCredential", "true"),
            ("returnSecureToken", "true"),
            ("autoCreate", "true"),
        ];
        self.post_form("signInWithIdp", &params).await
    }

    async fn send_phone_verification_code(
        &self,
        phone_number: &str,
        recaptcha_token: &str,
    ) -> Result<IdpVerificationSession, AppError> {
        let params = [("phoneNumber", phone_number), ("recaptchaToken", recaptcha_token)];
        self.post_form("sendVerificationCode", &params).await
    }

    async fn confirm_phone_number(
        &self,
        session_info: &str,
        code: &str,
        id_token: &str,
    ) -> Result<IdpPhoneConfirmation, AppError> {
        let params = [("sessionInfo", session_info), ("code", code), ("idToken", id_token)];
        self.post_form("signInWithPhoneNumber", &params).await
    }
}
