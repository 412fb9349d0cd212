//! Domain Layer Module
//!
//! 인증 서비스의 도메인 모델을 정의합니다.
//!
//! # 모듈 구성
//!
//! - [`entities`] - 영속화되는 엔티티 (로컬 사용자 미러)
//! - [`models`] - IdP 응답 모델, 검증된 신원, 대기 중인 전화번호 인증
//! - [`dto`] - HTTP 요청/응답 데이터 전송 객체

pub mod entities;
pub mod models;
pub mod dto;
