//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <token>` 헤더에서 IdP ID 토큰 추출
//! - 앱 데이터에 등록된 `TokenVerifier` 로 검증
//! - 검증된 신원(`VerifiedIdentity`)을 request extension 에 저장
//! - 검증 실패 시 다음 서비스를 호출하지 않고 401 반환
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! let verifier: Arc<dyn TokenVerifier> = Arc::new(IdTokenVerifier::from_env()?);
//!
//! App::new()
//!     .app_data(web::Data::from(verifier))
//!     .service(
//!         web::scope("/api/v1/me")
//!             .wrap(AuthMiddleware::required()) // 보호된 라우트에만 적용
//!             .route("/token", web::get().to(token_info))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
pub use auth_inner::extract_bearer_token;
