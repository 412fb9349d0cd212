//! # ID 토큰 검증기
//!
//! IdP가 발급한 RS256 ID 토큰을 공개키 세트(JWKS)로 검증합니다.
//!
//! ## 검증 항목
//!
//! - 헤더 `alg` = RS256, `kid` 로 공개키 선택
//! - 서명, 만료(`exp`)
//! - `aud` = IdP 프로젝트 ID
//! - `iss` = `{issuer_prefix}{project_id}`
//! - `sub` 가 비어 있지 않을 것
//!
//! 실패 사유는 debug 레벨 로그로만 남기고 호출자에게는 `None` 만 반환합니다.
//!
//! ## 키 캐싱
//!
//! 키 세트는 응답의 `Cache-Control: max-age` 동안 프로세스 메모리에 보관합니다.
//! 헤더가 없으면 설정된 기본 TTL 을 사용합니다. 캐시에 없는 `kid` 는 한 번 재조회를 유발하지만,
//! 유효한 캐시가 [`MIN_REFRESH_INTERVAL`] 안에 갱신되었다면 재조회 없이 거부합니다.
//! 잠금은 await 지점을 넘어 유지되지 않습니다.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use log::{debug, info};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use crate::config::IdentityProviderConfig;
use crate::domain::models::identity::VerifiedIdentity;
use crate::errors::AppError;

const KEY_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// 모르는 `kid` 로 인한 키 세트 재조회 사이의 최소 간격
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// 토큰 검증 계약
///
/// 어떤 이유로든 검증에 실패하면 `None` 을 반환합니다. 에러를 던지지 않습니다.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: Option<&str>) -> Option<VerifiedIdentity>;
}

#[derive(Debug, Error)]
enum Rejection {
    #[error("malformed token: {0}")]
    Malformed(jsonwebtoken::errors::Error),

    #[error("unexpected algorithm {0:?}")]
    Algorithm(Algorithm),

    #[error("token header has no kid")]
    MissingKeyId,

    #[error("unknown key id {0}")]
    UnknownKeyId(String),

    #[error("key set unavailable: {0}")]
    KeySetUnavailable(String),

    #[error("claims rejected: {0}")]
    Claims(jsonwebtoken::errors::Error),

    #[error("empty subject")]
    EmptySubject,
}

#[derive(Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    n: String,
    e: String,
}

struct CachedKeys {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
    expires_at: Instant,
}

impl CachedKeys {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// JWKS 기반 ID 토큰 검증기
pub struct IdTokenVerifier {
    http: reqwest::Client,
    jwks_url: String,
    project_id: String,
    issuer: String,
    fallback_ttl: Duration,
    min_refresh_interval: Duration,
    cache: RwLock<Option<CachedKeys>>,
}

impl IdTokenVerifier {
    pub fn new(
        jwks_url: impl Into<String>,
        project_id: impl Into<String>,
        issuer_prefix: &str,
        fallback_ttl: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(KEY_FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        let project_id = project_id.into();
        let issuer = format!("{}{}", issuer_prefix, project_id);

        Ok(Self {
            http,
            jwks_url: jwks_url.into(),
            project_id,
            issuer,
            fallback_ttl,
            min_refresh_interval: MIN_REFRESH_INTERVAL,
            cache: RwLock::new(None),
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(
            IdentityProviderConfig::jwks_url(),
            IdentityProviderConfig::project_id()?,
            &IdentityProviderConfig::issuer_prefix(),
            Duration::from_secs(IdentityProviderConfig::keys_fallback_ttl_seconds()),
        )
    }

    /// 모르는 `kid` 재조회 간격을 바꿉니다. 기본값은 [`MIN_REFRESH_INTERVAL`].
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    fn cached_key(&self, kid: &str) -> Option<DecodingKey> {
        let cache = self.cache.read().ok()?;
        let cached = cache.as_ref()?;

        if !cached.is_fresh(Instant::now()) {
            return None;
        }
        cached.keys.get(kid).cloned()
    }

    /// 유효한 캐시가 최소 간격 안에 갱신되었는지 여부
    fn refreshed_recently(&self) -> bool {
        let Ok(cache) = self.cache.read() else {
            return false;
        };
        let now = Instant::now();

        cache.as_ref().is_some_and(|cached| {
            cached.is_fresh(now) && now.duration_since(cached.fetched_at) < self.min_refresh_interval
        })
    }

    /// 키 세트를 다시 받아 캐시를 교체하고, 그 안에서 `kid` 에 해당하는 키를 돌려줍니다.
    async fn refresh_keys(&self, kid: &str) -> Result<Option<DecodingKey>, Rejection> {
        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| Rejection::KeySetUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Rejection::KeySetUnavailable(format!("HTTP {}", response.status())));
        }

        let ttl = response
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_max_age)
            .map(Duration::from_secs)
            .unwrap_or(self.fallback_ttl);

        let key_set: JwkSet = response
            .json()
            .await
            .map_err(|e| Rejection::KeySetUnavailable(e.to_string()))?;

        let keys: HashMap<String, DecodingKey> = key_set
            .keys
            .into_iter()
            .filter(|jwk| jwk.kty == "RSA")
            .filter_map(|jwk| {
                DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
                    .ok()
                    .map(|key| (jwk.kid, key))
            })
            .collect();

        info!("🔑 IdP 공개키 {}개 갱신 (캐시 {}초)", keys.len(), ttl.as_secs());
        let found = keys.get(kid).cloned();

        let mut cache = self
            .cache
            .write()
            .map_err(|_| Rejection::KeySetUnavailable("key cache lock poisoned".to_string()))?;
        let now = Instant::now();
        *cache = Some(CachedKeys {
            keys,
            fetched_at: now,
            expires_at: now + ttl,
        });

        Ok(found)
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey, Rejection> {
        if let Some(key) = self.cached_key(kid) {
            return Ok(key);
        }

        if self.refreshed_recently() {
            return Err(Rejection::UnknownKeyId(kid.to_string()));
        }

        self.refresh_keys(kid)
            .await?
            .ok_or_else(|| Rejection::UnknownKeyId(kid.to_string()))
    }

    async fn decode_identity(&self, token: &str) -> Result<VerifiedIdentity, Rejection> {
        let header = decode_header(token).map_err(Rejection::Malformed)?;
        if header.alg != Algorithm::RS256 {
            return Err(Rejection::Algorithm(header.alg));
        }

        let kid = header.kid.ok_or(Rejection::MissingKeyId)?;
        let key = self.key_for(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);

        let claims = decode::<Map<String, Value>>(token, &key, &validation)
            .map_err(Rejection::Claims)?
            .claims;

        let subject = claims
            .get("sub")
            .and_then(Value::as_str)
            .filter(|sub| !sub.trim().is_empty())
            .ok_or(Rejection::EmptySubject)?
            .to_string();

        Ok(VerifiedIdentity {
            subject,
            issuer: self.issuer.clone(),
            claims,
        })
    }
}

#[async_trait]
impl TokenVerifier for IdTokenVerifier {
    async fn verify(&self, token: Option<&str>) -> Option<VerifiedIdentity> {
        let token = token.map(str::trim).filter(|token| !token.is_empty())?;

        match self.decode_identity(token).await {
            Ok(identity) => Some(identity),
            Err(rejection) => {
                debug!("ID 토큰 검증 실패: {}", rejection);
                None
            }
        }
    }
}

/// `Cache-Control` 헤더에서 `max-age` 값을 읽습니다.
fn parse_max_age(header: &str) -> Option<u64> {
    header
        .split(',')
        .map(str::trim)
        .find_map(|directive| directive.strip_prefix("max-age="))
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PROJECT_ID: &str = "demo-project";
    const ISSUER_PREFIX: &str = "https://securetoken.google.com/";
    const KEY_ID: &str = "test-key-1";
    const SIGNING_KEY: &[u8] = include_bytes!("../../../tests/fixtures/test_signing_key.pem");
    const JWKS: &str = include_str!("../../../tests/fixtures/test_jwks.json");

    fn issuer() -> String {
        format!("{}{}", ISSUER_PREFIX, PROJECT_ID)
    }

    fn claims(sub: &str, aud: &str, iss: &str, exp_offset: i64) -> Value {
        let now = Utc::now().timestamp();
        json!({
            "sub": sub,
            "aud": aud,
            "iss": iss,
            "iat": now,
            "exp": now + exp_offset,
            "email": "ada@example.com"
        })
    }

    fn sign(claims: &Value, kid: Option<&str>) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = kid.map(str::to_string);
        let key = EncodingKey::from_rsa_pem(SIGNING_KEY).unwrap();
        encode(&header, claims, &key).unwrap()
    }

    fn valid_token() -> String {
        sign(&claims("uid-1", PROJECT_ID, &issuer(), 3600), Some(KEY_ID))
    }

    async fn jwks_server(expected_fetches: u64) -> MockServer {
        jwks_server_with_cache_control(Some("public, max-age=600, must-revalidate"), expected_fetches)
            .await
    }

    async fn jwks_server_with_cache_control(
        cache_control: Option<&str>,
        expected_fetches: u64,
    ) -> MockServer {
        let server = MockServer::start().await;
        let mut response = ResponseTemplate::new(200).set_body_raw(JWKS, "application/json");
        if let Some(value) = cache_control {
            response = response.insert_header("cache-control", value);
        }

        Mock::given(method("GET"))
            .and(path("/jwks"))
            .respond_with(response)
            .expect(expected_fetches)
            .mount(&server)
            .await;
        server
    }

    fn verifier(server: &MockServer) -> IdTokenVerifier {
        verifier_with_fallback(server, Duration::from_secs(60))
    }

    fn verifier_with_fallback(server: &MockServer, fallback_ttl: Duration) -> IdTokenVerifier {
        IdTokenVerifier::new(
            format!("{}/jwks", server.uri()),
            PROJECT_ID,
            ISSUER_PREFIX,
            fallback_ttl,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_max_age() {
        assert_eq!(parse_max_age("public, max-age=19845, must-revalidate"), Some(19845));
        assert_eq!(parse_max_age("max-age=60"), Some(60));
        assert_eq!(parse_max_age("no-cache"), None);
        assert_eq!(parse_max_age("max-age=soon"), None);
    }

    #[actix_web::test]
    async fn test_valid_token_yields_identity() {
        let server = jwks_server(1).await;
        let verifier = verifier(&server);

        let identity = verifier.verify(Some(&valid_token())).await.unwrap();

        assert_eq!(identity.subject, "uid-1");
        assert_eq!(identity.issuer, issuer());
        assert_eq!(identity.email(), Some("ada@example.com"));
    }

    #[actix_web::test]
    async fn test_missing_or_blank_token_is_rejected_without_fetch() {
        let server = jwks_server(0).await;
        let verifier = verifier(&server);

        assert!(verifier.verify(None).await.is_none());
        assert!(verifier.verify(Some("")).await.is_none());
        assert!(verifier.verify(Some("   ")).await.is_none());
    }

    #[actix_web::test]
    async fn test_garbage_token_is_rejected() {
        let server = jwks_server(0).await;
        let verifier = verifier(&server);

        assert!(verifier.verify(Some("not.a.jwt")).await.is_none());
        assert!(verifier.verify(Some("garbage")).await.is_none());
    }

    #[actix_web::test]
    async fn test_expired_token_is_rejected() {
        let server = jwks_server(1).await;
        let verifier = verifier(&server);

        let token = sign(&claims("uid-1", PROJECT_ID, &issuer(), -3600), Some(KEY_ID));
        assert!(verifier.verify(Some(&token)).await.is_none());
    }

    #[actix_web::test]
    async fn test_wrong_audience_and_issuer_are_rejected() {
        let server = jwks_server(1).await;
        let verifier = verifier(&server);

        let wrong_aud = sign(&claims("uid-1", "other-project", &issuer(), 3600), Some(KEY_ID));
        assert!(verifier.verify(Some(&wrong_aud)).await.is_none());

        let wrong_iss = sign(
            &claims("uid-1", PROJECT_ID, "https://securetoken.google.com/other", 3600),
            Some(KEY_ID),
        );
        assert!(verifier.verify(Some(&wrong_iss)).await.is_none());
    }

    #[actix_web::test]
    async fn test_empty_subject_is_rejected() {
        let server = jwks_server(1).await;
        let verifier = verifier(&server);

        let token = sign(&claims("", PROJECT_ID, &issuer(), 3600), Some(KEY_ID));
        assert!(verifier.verify(Some(&token)).await.is_none());
    }

    #[actix_web::test]
    async fn test_tampered_signature_is_rejected() {
        let server = jwks_server(1).await;
        let verifier = verifier(&server);

        let token = valid_token();
        let (unsigned, _signature) = token.rsplit_once('.').unwrap();
        let other = sign(&claims("uid-2", PROJECT_ID, &issuer(), 3600), Some(KEY_ID));
        let (_, other_signature) = other.rsplit_once('.').unwrap();
        let tampered = format!("{}.{}", unsigned, other_signature);

        assert!(verifier.verify(Some(&tampered)).await.is_none());
    }

    #[actix_web::test]
    async fn test_keys_are_cached_between_verifications() {
        let server = jwks_server(1).await;
        let verifier = verifier(&server);

        for _ in 0..3 {
            assert!(verifier.verify(Some(&valid_token())).await.is_some());
        }
    }

    #[actix_web::test]
    async fn test_unknown_kid_forces_single_refresh() {
        // 첫 검증에서 1회, 모르는 kid 로 1회
        let server = jwks_server(2).await;
        let verifier = verifier(&server).with_min_refresh_interval(Duration::ZERO);

        assert!(verifier.verify(Some(&valid_token())).await.is_some());

        let token = sign(&claims("uid-1", PROJECT_ID, &issuer(), 3600), Some("rotated-key"));
        assert!(verifier.verify(Some(&token)).await.is_none());
    }

    #[actix_web::test]
    async fn test_unknown_kids_on_warm_cache_do_not_refetch() {
        let server = jwks_server(1).await;
        let verifier = verifier(&server);

        assert!(verifier.verify(Some(&valid_token())).await.is_some());

        for i in 0..20 {
            let kid = format!("bogus-{}", i);
            let token = sign(&claims("uid-1", PROJECT_ID, &issuer(), 3600), Some(&kid));
            assert!(verifier.verify(Some(&token)).await.is_none());
        }

        // 알려진 키는 계속 캐시에서 통과
        assert!(verifier.verify(Some(&valid_token())).await.is_some());
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_unknown_kid_on_cold_cache_fetches_once() {
        let server = jwks_server(1).await;
        let verifier = verifier(&server);

        let token = sign(&claims("uid-1", PROJECT_ID, &issuer(), 3600), Some("bogus"));
        assert!(verifier.verify(Some(&token)).await.is_none());
        assert!(verifier.verify(Some(&token)).await.is_none());
    }

    #[actix_web::test]
    async fn test_expired_max_age_refetches_keys() {
        let server = jwks_server_with_cache_control(Some("max-age=0"), 2).await;
        let verifier = verifier(&server);

        assert!(verifier.verify(Some(&valid_token())).await.is_some());
        assert!(verifier.verify(Some(&valid_token())).await.is_some());
    }

    #[actix_web::test]
    async fn test_fallback_ttl_caches_keys_without_cache_control() {
        let server = jwks_server_with_cache_control(None, 1).await;
        let verifier = verifier_with_fallback(&server, Duration::from_secs(60));

        for _ in 0..3 {
            assert!(verifier.verify(Some(&valid_token())).await.is_some());
        }
    }

    #[actix_web::test]
    async fn test_zero_fallback_ttl_refetches_without_cache_control() {
        let server = jwks_server_with_cache_control(None, 2).await;
        let verifier = verifier_with_fallback(&server, Duration::ZERO);

        assert!(verifier.verify(Some(&valid_token())).await.is_some());
        assert!(verifier.verify(Some(&valid_token())).await.is_some());
    }

    #[actix_web::test]
    async fn test_missing_kid_is_rejected() {
        let server = jwks_server(0).await;
        let verifier = verifier(&server);

        let token = sign(&claims("uid-1", PROJECT_ID, &issuer(), 3600), None);
        assert!(verifier.verify(Some(&token)).await.is_none());
    }

    #[actix_web::test]
    async fn test_key_set_outage_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jwks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let verifier = verifier(&server);

        assert!(verifier.verify(Some(&valid_token())).await.is_none());
    }
}
