//! 인증 관련 HTTP 핸들러
//!
//! 모든 엔드포인트는 IdP에 위임하며 인증 없이 접근할 수 있습니다.

use actix_web::{post, web, HttpResponse};
use crate::config::OAuthProvider;
use crate::domain::dto::users::request::{LoginRequest, OAuthSignInRequest, PasswordResetRequest};
use crate::domain::dto::users::response::{MessageResponse, OAuthSessionResponse, SessionResponse};
use crate::errors::AppError;
use crate::services::accounts::AccountService;
use super::validate_payload;

/// 이메일/비밀번호 로그인
#[post("/login")]
pub async fn login(
    service: web::Data<AccountService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let session = service.login(&payload.email, &payload.password).await?;
    log::info!("로그인 성공: {}", payload.email);

    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

/// 비밀번호 재설정 메일 발송
#[post("/password-reset")]
pub async fn password_reset(
    service: web::Data<AccountService>,
    payload: web::Json<PasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    service.reset_password(&payload.email).await?;

    Ok(HttpResponse::Accepted().json(MessageResponse::new(
        "비밀번호 재설정 메일을 발송했습니다",
    )))
}

/// 익명 로그인
#[post("/anonymous")]
pub async fn anonymous_sign_in(
    service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    let session = service.sign_in_anonymously().await?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

/// 외부 프로바이더 액세스 토큰으로 로그인
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/oauth \
///   -H "Content-Type: application/json" \
///   -d '{"provider":"google","access_token":"ya29.a0Af..."}'
/// ```
#[post("/oauth")]
pub async fn oauth_sign_in(
    service: web::Data<AccountService>,
    payload: web::Json<OAuthSignInRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let provider = OAuthProvider::from_str(&payload.provider)?;
    let result = service
        .sign_in_with_oauth_access_token(provider, &payload.access_token)
        .await?;

    Ok(HttpResponse::Ok().json(OAuthSessionResponse::from(result)))
}
