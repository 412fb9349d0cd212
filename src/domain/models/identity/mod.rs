//! IdP 연동 모델
//!
//! - [`idp_result`] - Identity Toolkit REST 응답 (성공/에러 본문)
//! - [`verified_identity`] - 검증된 ID 토큰에서 추출한 요청 범위 신원

pub mod idp_result;
pub mod verified_identity;

pub use idp_result::*;
pub use verified_identity::VerifiedIdentity;
