//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 문자열 검증 및 파싱 유틸리티를 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 전화번호 형식 검사, IdP 응답 값 파싱

pub mod string_utils;
