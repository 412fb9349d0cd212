//! # 계정 생명주기 코디네이터 (Account Lifecycle Coordinator)
//!
//! 외부 IdP 계정과 로컬 사용자 레코드를 함께 관리하는 서비스입니다.
//! 두 저장소 사이에는 분산 트랜잭션이 없으므로 호출 순서와 실패 분류로 일관성을 유지합니다.
//!
//! ## 순서 규칙
//!
//! ```text
//! 회원가입:  로컬 중복 검사 ─► IdP signUp ─► 로컬 insert
//!                 │                 │              │
//!                 ▼                 ▼              ▼
//!         DuplicateAccount    IdP 에러 그대로    PartialRegistrationFailure
//!         (IdP 호출 없음)     (로컬 쓰기 없음)   (IdP 계정만 존재, error 로그)
//!
//! 계정 삭제: 로컬 조회 ─► IdP 재인증 + delete ─► 로컬 delete
//!                 │                 │                   │
//!                 ▼                 ▼                   ▼
//!             NotFound        IdP 에러 그대로       PartialDeletionFailure
//!           (IdP 호출 없음)   (로컬 행 유지)       (로컬 행만 존재, error 로그)
//! ```
//!
//! IdP 실패가 성공으로 바뀌는 경로는 없습니다.
//!
//! ## 알려진 한계
//!
//! 같은 이메일에 대한 동시 가입/삭제 요청은 직렬화하지 않습니다.
//! 동시 가입은 로컬 `email` 유니크 인덱스가 마지막에 막고, 그 경우 `PartialRegistrationFailure` 로 보고됩니다.

use std::sync::Arc;
use log::{error, info, warn};
use crate::config::{OAuthProvider, PhoneVerificationConfig};
use crate::domain::entities::users::user::LocalUser;
use crate::domain::models::identity::{IdpAuthResult, IdpOAuthResult, VerifiedIdentity};
use crate::domain::models::phone::PendingPhoneVerification;
use crate::errors::AppError;
use crate::repositories::users::UserStore;
use crate::repositories::verifications::PhoneVerificationStore;
use crate::services::identity::IdentityProvider;
use crate::utils::string_utils::validate_required_string;

/// 회원가입 결과. 비밀번호는 포함되지 않습니다.
#[derive(Debug, Clone)]
pub struct RegisteredAccount {
    pub user: LocalUser,
    pub session: IdpAuthResult,
}

/// 계정 생명주기 서비스
///
/// 모든 의존성은 trait 객체로 주입됩니다. `web::Data<AccountService>` 로 핸들러에 공유됩니다.
pub struct AccountService {
    identity_provider: Arc<dyn IdentityProvider>,
    user_store: Arc<dyn UserStore>,
    phone_verifications: Arc<dyn PhoneVerificationStore>,
    phone_verification_ttl_seconds: u64,
}

impl AccountService {
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        user_store: Arc<dyn UserStore>,
        phone_verifications: Arc<dyn PhoneVerificationStore>,
    ) -> Self {
        Self {
            identity_provider,
            user_store,
            phone_verifications,
            phone_verification_ttl_seconds: PhoneVerificationConfig::ttl_seconds(),
        }
    }

    pub fn with_phone_verification_ttl(mut self, ttl_seconds: u64) -> Self {
        self.phone_verification_ttl_seconds = ttl_seconds;
        self
    }

    /// 회원가입
    ///
    /// 1. 로컬에 같은 이메일이 있으면 IdP를 호출하지 않고 `DuplicateAccount`
    /// 2. IdP `signUp`. 실패는 그대로 전파되며 로컬에는 아무것도 쓰지 않습니다
    /// 3. IdP가 발급한 ID 토큰과 함께 로컬 사용자 저장
    ///
    /// 3단계 실패 시 IdP 계정은 이미 존재하므로 `PartialRegistrationFailure` 를 반환합니다.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisteredAccount, AppError> {
        let name = validate_required_string(name, "name")?;

        if self.user_store.exists(email).await? {
            return Err(AppError::DuplicateAccount(email.to_string()));
        }

        let session = self.identity_provider.sign_up(email, password).await?;

        let mut user = LocalUser::new(name, email.to_string(), session.id_token.clone());
        match self.user_store.insert(user.clone()).await {
            Ok(id) => user.id = Some(id),
            Err(e) => {
                error!(
                    "❌ 회원가입 부분 실패 (IdP 계정 생성됨, 로컬 저장 실패): email={}, idp_uid={}, reason={}",
                    email, session.local_id, e
                );
                return Err(AppError::PartialRegistrationFailure {
                    email: email.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        info!("✅ 회원가입 완료: {}", email);
        Ok(RegisteredAccount { user, session })
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 로컬 레코드의 ID 토큰 갱신은 최선 노력(best-effort)이며 결과에 영향을 주지 않습니다.
    pub async fn login(&self, email: &str, password: &str) -> Result<IdpAuthResult, AppError> {
        let session = self.identity_provider.sign_in(email, password).await?;

        match self.user_store.update_external_token(email, &session.id_token).await {
            Ok(true) => {}
            Ok(false) => warn!("로그인한 IdP 계정에 대응하는 로컬 사용자가 없습니다: {}", email),
            Err(e) => warn!("로컬 ID 토큰 갱신 실패 (로그인은 성공): {} - {}", email, e),
        }

        Ok(session)
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), AppError> {
        self.identity_provider.send_password_reset(email).await
    }

    /// 계정 삭제
    ///
    /// 로컬 행은 IdP 삭제가 성공한 뒤에만 지웁니다.
    pub async fn delete_account(&self, email: &str, password: &str) -> Result<(), AppError> {
        let user = self
            .user_store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", email)))?;

        self.identity_provider.delete_remote_account(email, password).await?;

        let id = user.id_string();
        match self.user_store.delete(&id).await {
            Ok(true) => {
                info!("🗑️ 계정 삭제 완료: {}", email);
                Ok(())
            }
            Ok(false) => {
                warn!("IdP 계정 삭제 후 로컬 행이 이미 없습니다: {}", email);
                Ok(())
            }
            Err(e) => {
                error!(
                    "❌ 계정 삭제 부분 실패 (IdP 계정 삭제됨, 로컬 삭제 실패): email={}, id={}, reason={}",
                    email, id, e
                );
                Err(AppError::PartialDeletionFailure {
                    email: email.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// 외부 프로바이더 액세스 토큰 로그인. 로컬 저장소에는 쓰지 않습니다.
    pub async fn sign_in_with_oauth_access_token(
        &self,
        provider: OAuthProvider,
        access_token: &str,
    ) -> Result<IdpOAuthResult, AppError> {
        self.identity_provider
            .sign_in_with_oauth_access_token(provider, access_token)
            .await
    }

    pub async fn sign_in_anonymously(&self) -> Result<IdpAuthResult, AppError> {
        self.identity_provider.sign_in_anonymously().await
    }

    /// 전화번호 인증 시작
    ///
    /// 인증번호를 발송하고 IdP 세션 정보를 TTL 과 함께 보관합니다.
    /// 로컬 사용자 레코드는 확인이 끝날 때까지 변경하지 않습니다.
    pub async fn start_phone_verification(
        &self,
        identity: &VerifiedIdentity,
        phone_number: &str,
        recaptcha_token: &str,
    ) -> Result<PendingPhoneVerification, AppError> {
        let user = self.local_user_for(identity).await?;

        let session = self
            .identity_provider
            .send_phone_verification_code(phone_number, recaptcha_token)
            .await?;

        let pending = PendingPhoneVerification::new(
            identity.subject.clone(),
            user.email,
            phone_number.to_string(),
            session.session_info,
        );
        self.phone_verifications
            .save(&pending, self.phone_verification_ttl_seconds)
            .await?;

        info!("📱 전화번호 인증번호 발송: subject={}", identity.subject);
        Ok(pending)
    }

    /// 전화번호 인증 확인
    ///
    /// IdP가 인증번호를 승인한 뒤에만 로컬 사용자에 전화번호를 기록합니다.
    pub async fn confirm_phone_verification(
        &self,
        identity: &VerifiedIdentity,
        id_token: &str,
        code: &str,
    ) -> Result<LocalUser, AppError> {
        let pending = self
            .phone_verifications
            .find(&identity.subject)
            .await?
            .ok_or_else(|| AppError::NotFound("진행 중인 전화번호 인증이 없습니다".to_string()))?;

        let confirmation = self
            .identity_provider
            .confirm_phone_number(&pending.session_info, code, id_token)
            .await?;

        if !self
            .user_store
            .update_phone_number(&pending.email, &confirmation.phone_number)
            .await?
        {
            return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", pending.email)));
        }

        if let Err(e) = self.phone_verifications.remove(&identity.subject).await {
            warn!("전화번호 인증 세션 정리 실패 (TTL 만료 대기): {} - {}", identity.subject, e);
        }

        info!("✅ 전화번호 인증 완료: {}", pending.email);
        self.user_store
            .find_by_email(&pending.email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", pending.email)))
    }

    async fn local_user_for(&self, identity: &VerifiedIdentity) -> Result<LocalUser, AppError> {
        let email = identity
            .email()
            .ok_or_else(|| AppError::NotFound("이메일 계정이 아닙니다".to_string()))?;

        self.user_store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", email)))
    }
}
