//! 에러 타입 모듈
//!
//! [`errors::AppError`]와 관련 헬퍼를 제공합니다.

#[allow(clippy::module_inception)]
pub mod errors;

pub use errors::{AppError, AppResult};
