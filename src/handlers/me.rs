//! 인증된 사용자 본인 관련 핸들러
//!
//! `/api/v1/me` 스코프는 `AuthMiddleware` 로 보호됩니다.
//! 핸들러는 검증된 신원을 [`VerifiedIdentity`] 인자로 받습니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use actix_web::http::header::AUTHORIZATION;
use crate::domain::dto::users::request::{PhoneVerificationConfirmRequest, PhoneVerificationRequest};
use crate::domain::dto::users::response::PhoneVerificationResponse;
use crate::domain::models::identity::VerifiedIdentity;
use crate::errors::AppError;
use crate::middlewares::extract_bearer_token;
use crate::services::accounts::AccountService;
use super::validate_payload;

/// 현재 토큰의 신원 정보 (subject, issuer, claims)
#[get("/token")]
pub async fn token_info(identity: VerifiedIdentity) -> HttpResponse {
    HttpResponse::Ok().json(identity)
}

/// 전화번호 인증번호 발송
#[post("/phone/verification")]
pub async fn start_phone_verification(
    service: web::Data<AccountService>,
    identity: VerifiedIdentity,
    payload: web::Json<PhoneVerificationRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let pending = service
        .start_phone_verification(&identity, &payload.phone_number, &payload.recaptcha_token)
        .await?;

    Ok(HttpResponse::Accepted().json(PhoneVerificationResponse {
        phone_number: pending.phone_number,
        verified: false,
        message: "인증번호를 발송했습니다".to_string(),
    }))
}

/// 전화번호 인증번호 확인
///
/// IdP가 전화번호를 계정에 연결하려면 사용자의 ID 토큰이 필요하므로 요청 헤더의 토큰을 함께 전달합니다.
#[post("/phone/verification/confirm")]
pub async fn confirm_phone_verification(
    req: HttpRequest,
    service: web::Data<AccountService>,
    identity: VerifiedIdentity,
    payload: web::Json<PhoneVerificationConfirmRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let id_token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or(AppError::VerificationFailure)?;

    let user = service
        .confirm_phone_verification(&identity, id_token, &payload.code)
        .await?;

    Ok(HttpResponse::Ok().json(PhoneVerificationResponse {
        phone_number: user.phone_number.unwrap_or_default(),
        verified: true,
        message: "전화번호 인증이 완료되었습니다".to_string(),
    }))
}
