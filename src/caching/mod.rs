//! 캐시 및 임시 저장소 모듈
//!
//! Redis 기반의 만료 시간이 있는 키-값 저장소를 제공합니다.

pub mod redis;
