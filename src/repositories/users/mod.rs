//! 로컬 사용자 저장소
//!
//! [`UserStore`] trait 과 두 가지 구현을 제공합니다.
//!
//! - [`UserRepository`] - MongoDB `users` 컬렉션
//! - [`InMemoryUserRepository`] - 프로세스 메모리 (테스트, 로컬 개발)

pub mod user_store;
pub mod user_repo;
pub mod memory_user_repo;

pub use user_store::UserStore;
pub use user_repo::UserRepository;
pub use memory_user_repo::InMemoryUserRepository;
