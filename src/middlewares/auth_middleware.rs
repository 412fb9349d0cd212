//! ID 토큰 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 IdP ID 토큰을 검증하고 신원 정보를 요청에 첨부합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// ID 토큰 인증 미들웨어
///
/// 보호가 필요한 스코프에만 `.wrap()` 합니다. 검증기는 요청마다 앱 데이터
/// (`web::Data<dyn TokenVerifier>`)에서 가져옵니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
