//! 검증된 신원 (Verified Identity)
//!
//! 토큰 검증을 통과한 요청에만 존재하며 요청 확장(extensions)에 보관됩니다.
//! 저장되지 않고 요청이 끝나면 사라집니다.

use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;
use serde_json::{Map, Value};
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedIdentity {
    /// IdP 사용자 식별자 (`sub`)
    pub subject: String,
    /// 토큰 발급자 (`iss`)
    pub issuer: String,
    /// 토큰의 전체 클레임
    pub claims: Map<String, Value>,
}

impl VerifiedIdentity {
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn email(&self) -> Option<&str> {
        self.claim("email").and_then(Value::as_str)
    }
}

/// 핸들러 인자로 신원을 받기 위한 추출자
///
/// 인증 미들웨어가 적용되지 않은 경로에서 사용하면 401 을 반환합니다.
impl FromRequest for VerifiedIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<VerifiedIdentity>() {
            Some(identity) => ready(Ok(identity.clone())),
            None => ready(Err(AppError::VerificationFailure.into())),
        }
    }
}
