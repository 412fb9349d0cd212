//! 계정 생명주기 서비스
//!
//! IdP 계정과 로컬 사용자 미러의 생성/삭제 순서와 부분 실패를 관리합니다.

pub mod account_service;

pub use account_service::{AccountService, RegisteredAccount};
