//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 입력 검증 후 [`AccountService`](crate::services::accounts::AccountService) 에 위임하고,
//! 결과를 응답 DTO 로 변환합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   AuthMiddleware (/api/v1/me 스코프만)
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈)                            ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   AccountService                               ← Service Layer
//! ├──────────────────────┬──────────────────────┤
//!   IdentityProvider (IdP REST)   UserStore / PhoneVerificationStore
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`users`**: 회원가입 (`POST /users`), 계정 삭제 (`DELETE /users`)
//! - **`auth`**: 로그인, 비밀번호 재설정, 익명 로그인, OAuth 액세스 토큰 로그인
//! - **`me`**: 토큰 정보 조회, 전화번호 인증 (인증 필요)
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>` 를 반환합니다.
//! 자격 증명 관련 실패는 원인과 관계없이 같은 401 응답으로 변환됩니다.

use validator::Validate;
use crate::errors::AppError;

pub mod users;
pub mod auth;
pub mod me;

/// validator 검증 결과를 `AppError::ValidationError` 로 변환합니다.
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))
}
