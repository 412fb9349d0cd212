//! 진행 중인 전화번호 인증 저장소
//!
//! 인증번호 발송과 확인 사이의 IdP 세션 정보를 TTL 과 함께 보관합니다.

pub mod phone_verification_store;

pub use phone_verification_store::{
    InMemoryPhoneVerificationStore, PhoneVerificationStore, RedisPhoneVerificationStore,
};
