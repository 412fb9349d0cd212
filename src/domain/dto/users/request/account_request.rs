//! 계정 생성/삭제 요청 DTO
//!
//! 비밀번호 강도 정책은 IdP가 판단합니다 (`WEAK_PASSWORD`).
//! 여기서는 형식만 검증합니다.
use serde::Deserialize;
use validator::Validate;

/// 회원가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// 표시 이름 (1-50자)
    #[validate(length(
        min = 1,
        max = 50,
        message = "이름은 1-50자 사이여야 합니다"
    ))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 계정 삭제 요청. IdP 재인증에 비밀번호가 필요합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteAccountRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest { email: "not-an-email".into(), ..valid.clone() };
        assert!(bad_email.validate().is_err());

        let empty_name = RegisterRequest { name: "".into(), ..valid.clone() };
        assert!(empty_name.validate().is_err());

        let long_name = RegisterRequest { name: "a".repeat(51), ..valid };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_delete_request_requires_password() {
        let request = DeleteAccountRequest {
            email: "ada@example.com".into(),
            password: "".into(),
        };
        assert!(request.validate().is_err());
    }
}
