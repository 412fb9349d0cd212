//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소는 trait 으로 추상화되어 있고, 서비스는 `Arc<dyn Trait>` 로 주입받습니다.
//! 운영 환경은 MongoDB/Redis 구현을, 테스트는 인메모리 구현을 사용합니다.
//!
//! # Modules
//!
//! - [`users`] - 로컬 사용자 미러 (`UserStore`)
//! - [`verifications`] - 진행 중인 전화번호 인증 (`PhoneVerificationStore`)

pub mod users;
pub mod verifications;
