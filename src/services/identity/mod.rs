//! 외부 IdP 연동 서비스
//!
//! - [`identity_toolkit_client`] - Identity Toolkit REST 클라이언트 (`IdentityProvider`)
//! - [`token_verifier`] - IdP 발급 ID 토큰 검증기 (`TokenVerifier`)

pub mod identity_toolkit_client;
pub mod token_verifier;

pub use identity_toolkit_client::{IdentityProvider, IdentityToolkitClient};
pub use token_verifier::{IdTokenVerifier, TokenVerifier};
