//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::errors::AppError;
use crate::services::identity::TokenVerifier;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let Some(verifier) = req.app_data::<web::Data<dyn TokenVerifier>>().cloned() else {
                log::error!("TokenVerifier 가 앱 데이터에 등록되지 않았습니다");
                let response = AppError::InternalError("token verifier not configured".to_string())
                    .error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            let token = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(extract_bearer_token)
                .map(str::to_string);

            match verifier.verify(token.as_deref()).await {
                Some(identity) => {
                    log::debug!("인증 성공: subject {}", identity.subject);
                    req.extensions_mut().insert(identity);
                }
                None => {
                    log::warn!("인증 실패: {} {}", req.method(), req.path());
                    let response = AppError::VerificationFailure.error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// `Authorization` 헤더 값에서 Bearer 토큰을 추출합니다.
///
/// 스킴은 대소문자를 구분하지 않습니다. 토큰이 비어 있으면 `None`.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Bearer   abc  "), Some("abc"));

        assert_eq!(extract_bearer_token("Bearer"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic dXNlcjpwdw=="), None);
        assert_eq!(extract_bearer_token("abc"), None);
    }
}
