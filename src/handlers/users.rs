//! # User Account HTTP Handlers
//!
//! 계정 생성과 삭제 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/users` | 회원가입 (IdP 계정 + 로컬 사용자) | 201 Created |
//! | `DELETE` | `/api/v1/users` | 계정 삭제 (비밀번호 재확인) | 204 No Content |

use actix_web::{delete, post, web, HttpResponse};
use crate::domain::dto::users::request::{DeleteAccountRequest, RegisterRequest};
use crate::domain::dto::users::response::{RegisterResponse, SessionResponse, UserResponse};
use crate::errors::AppError;
use crate::services::accounts::AccountService;
use super::validate_payload;

/// 회원가입 핸들러
///
/// # 응답
///
/// - `201 Created`: 사용자 정보와 IdP 세션 토큰
/// - `409 Conflict`: `{"error":"EMAIL_EXISTS"}` (로컬/IdP 어느 쪽에서 발견되든 동일)
/// - `400 Bad Request`: 입력 검증 실패 또는 IdP 거부 (`WEAK_PASSWORD` 등)
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/users \
///   -H "Content-Type: application/json" \
///   -d '{"name":"Ada","email":"ada@example.com","password":"secret123"}'
/// ```
#[post("")]
pub async fn create_user(
    service: web::Data<AccountService>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let RegisterRequest { name, email, password } = payload.into_inner();
    let account = service.register(&name, &email, &password).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        user: UserResponse::from(account.user),
        session: SessionResponse::from(account.session),
        message: "회원가입이 완료되었습니다".to_string(),
    }))
}

/// 계정 삭제 핸들러
///
/// 존재하지 않는 이메일과 틀린 비밀번호는 같은 401 응답을 받습니다.
#[delete("")]
pub async fn delete_user(
    service: web::Data<AccountService>,
    payload: web::Json<DeleteAccountRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    match service.delete_account(&payload.email, &payload.password).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(AppError::NotFound(_)) => Err(AppError::InvalidCredentials),
        Err(e) => Err(e),
    }
}
