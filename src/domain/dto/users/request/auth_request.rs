//! 인증 요청관련 DTO
//!
//! 로그인, 비밀번호 재설정, OAuth 액세스 토큰 로그인 요청을 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 이메일/비밀번호 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 비밀번호 재설정 메일 발송 요청
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

/// 외부 프로바이더 액세스 토큰으로 로그인하는 요청
///
/// `provider` 는 `google` / `google.com` 형태를 모두 허용합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthSignInRequest {
    #[validate(length(min = 1, message = "프로바이더를 지정해주세요"))]
    pub provider: String,

    #[validate(length(min = 1, message = "액세스 토큰이 필요합니다"))]
    pub access_token: String,
}
