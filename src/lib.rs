//! IdP 연동 인증 서비스 백엔드
//!
//! 외부 IdP(Identity Toolkit REST API)를 인증의 원천으로 사용하고,
//! 로컬 사용자 미러를 MongoDB에 유지하는 인증 서비스입니다.
//!
//! # Features
//!
//! - **계정 생명주기**: 회원가입/삭제 시 IdP와 로컬 저장소의 순서 보장, 부분 실패 분류
//! - **IdP 위임 인증**: 로그인, 비밀번호 재설정, 익명 로그인, OAuth 액세스 토큰 로그인
//! - **ID 토큰 검증**: JWKS 기반 RS256 검증, 키 캐싱
//! - **인증 게이트**: 보호된 스코프에 대한 Bearer 토큰 미들웨어
//! - **전화번호 인증**: 인증번호 발송/확인 (Redis 에 세션 보관)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (+ AuthMiddleware)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AccountService  │ ← 계정 생명주기 조정
//! └─────────────────┘
//!      │        │
//!      ▼        ▼
//! ┌────────┐ ┌─────────────────┐
//! │  IdP   │ │  Repositories   │ ← MongoDB (사용자) + Redis (전화번호 인증)
//! └────────┘ └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use identity_bridge_service::repositories::users::InMemoryUserRepository;
//! use identity_bridge_service::repositories::verifications::InMemoryPhoneVerificationStore;
//! use identity_bridge_service::services::accounts::AccountService;
//! use identity_bridge_service::services::identity::IdentityToolkitClient;
//!
//! let service = AccountService::new(
//!     Arc::new(IdentityToolkitClient::from_env()?),
//!     Arc::new(InMemoryUserRepository::new()),
//!     Arc::new(InMemoryPhoneVerificationStore::new()),
//! );
//! let account = service.register("Ada", "ada@example.com", "secret123").await?;
//! ```

pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
