//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 외부 IdP와 로컬 사용자 저장소를 함께 다루는 인증 서비스의 통합 에러 타입입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | 종류 | 발생 위치 | HTTP |
//! |------|-----------|------|
//! | `IdentityProviderError` | IdP가 보고한 실패 (non-2xx) | 401 / 409 / 400 / 502 |
//! | `TransportFailure` | IdP와의 네트워크/파싱 실패 | 502 |
//! | `DuplicateAccount` | 로컬 사전 검사, 유니크 인덱스 | 409 |
//! | `NotFound` | 로컬 사전 검사 | 404 |
//! | `PartialRegistrationFailure` / `PartialDeletionFailure` | IdP 성공 후 로컬 실패 | 500 |
//! | `VerificationFailure` | 토큰 검증 거부 | 401 |
//!
//! ## 계정 열거(enumeration) 방지
//!
//! 자격 증명 관련 실패는 원인과 관계없이 동일한 응답 본문을 만듭니다.
//! 존재하지 않는 이메일과 틀린 비밀번호는 응답만으로 구분할 수 없습니다.
//!
//! ```text
//! EMAIL_NOT_FOUND / INVALID_PASSWORD / USER_DISABLED  ─┐
//! InvalidCredentials (로컬 NotFound 변환)              ─┴─► 401 {"error":"INVALID_LOGIN_CREDENTIALS"}
//!
//! EMAIL_EXISTS (IdP) / DuplicateAccount (로컬)          ───► 409 {"error":"EMAIL_EXISTS"}
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 자격 증명 실패 시 외부로 노출되는 유일한 메시지
pub const INVALID_LOGIN_CREDENTIALS: &str = "INVALID_LOGIN_CREDENTIALS";

/// 중복 계정 시 외부로 노출되는 유일한 메시지
pub const EMAIL_EXISTS: &str = "EMAIL_EXISTS";

/// IdP 메시지 중 자격 증명 실패로 취급하는 코드들
const CREDENTIAL_FAILURE_CODES: [&str; 4] = [
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
];

/// 애플리케이션 전역 에러 타입
///
/// 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 설정 누락/오류 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 로컬 저장소에 이미 같은 이메일이 존재 (409 Conflict)
    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),

    /// 자격 증명 실패. 원인을 구분하지 않습니다 (401 Unauthorized)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// IdP가 non-2xx 로 응답한 경우. IdP의 코드와 메시지를 그대로 보존합니다.
    #[error("Identity provider error ({code}): {message}")]
    IdentityProviderError { code: u16, message: String },

    /// IdP와의 통신 자체가 실패 (네트워크, 응답 파싱)
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// IdP 계정은 생성되었지만 로컬 저장에 실패. 재조정(reconciliation) 대상입니다.
    #[error("Partial registration failure for {email}: {reason}")]
    PartialRegistrationFailure { email: String, reason: String },

    /// IdP 계정은 삭제되었지만 로컬 삭제에 실패. 재조정(reconciliation) 대상입니다.
    #[error("Partial deletion failure for {email}: {reason}")]
    PartialDeletionFailure { email: String, reason: String },

    /// 토큰 검증 거부 (401 Unauthorized). 거부 사유는 노출하지 않습니다.
    #[error("Token verification failed")]
    VerificationFailure,

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// IdP 메시지의 선두 코드 (`WEAK_PASSWORD : Password should be ...` → `WEAK_PASSWORD`)
    fn provider_message_code(message: &str) -> &str {
        message.split(':').next().unwrap_or(message).trim()
    }

    /// IdP 에러가 자격 증명 실패를 의미하는지 여부
    pub fn is_credential_failure(&self) -> bool {
        match self {
            AppError::InvalidCredentials => true,
            AppError::IdentityProviderError { message, .. } => {
                CREDENTIAL_FAILURE_CODES.contains(&Self::provider_message_code(message))
            }
            _ => false,
        }
    }

    /// 클라이언트에게 노출할 상태 코드와 메시지
    ///
    /// 500 계열의 상세 원인은 로그로만 남기고 응답에는 포함하지 않습니다.
    pub fn public_parts(&self) -> (StatusCode, String) {
        if self.is_credential_failure() {
            return (StatusCode::UNAUTHORIZED, INVALID_LOGIN_CREDENTIALS.to_string());
        }

        match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::DuplicateAccount(_) => (StatusCode::CONFLICT, EMAIL_EXISTS.to_string()),
            AppError::IdentityProviderError { code, message } => {
                let provider_code = Self::provider_message_code(message);
                if provider_code == EMAIL_EXISTS {
                    (StatusCode::CONFLICT, EMAIL_EXISTS.to_string())
                } else if *code >= 500 {
                    (StatusCode::BAD_GATEWAY, "IDENTITY_PROVIDER_UNAVAILABLE".to_string())
                } else {
                    (StatusCode::BAD_REQUEST, provider_code.to_string())
                }
            }
            AppError::TransportFailure(_) => {
                (StatusCode::BAD_GATEWAY, "IDENTITY_PROVIDER_UNAVAILABLE".to_string())
            }
            AppError::VerificationFailure => {
                (StatusCode::UNAUTHORIZED, "유효한 인증 토큰이 필요합니다".to_string())
            }
            AppError::PartialRegistrationFailure { .. } | AppError::PartialDeletionFailure { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "계정 동기화 중 오류가 발생했습니다".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "서버 오류가 발생했습니다".to_string(),
            ),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.public_parts().0
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let (status, message) = self.public_parts();

        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": message
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
