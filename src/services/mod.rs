//! 비즈니스 로직 서비스 모듈
//!
//! - [`identity`] - 외부 IdP REST 클라이언트와 ID 토큰 검증기
//! - [`accounts`] - IdP 계정과 로컬 사용자를 함께 관리하는 계정 생명주기 서비스

pub mod identity;
pub mod accounts;
